//! Moot Run - interprets a case document and argues it out
//!
//! This binary runs the full pipeline: document load, command
//! interpretation, and (unless disabled) the burden-of-proof dialogue
//! between the case's two sides.

use std::path::PathBuf;

use clap::Parser;
use moot_case::{CaseLoader, Interpreter};
use moot_dialogue::{Dialogue, DialogueError, DEFAULT_SEARCH_DEPTH};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "moot-run")]
#[command(about = "Interpret a case document and run its burden-of-proof dialogue")]
struct Cli {
    /// Path to a YAML case document
    case: PathBuf,

    /// Maximum number of pool arguments considered per turn
    #[arg(long, default_value_t = DEFAULT_SEARCH_DEPTH)]
    depth: usize,

    /// Stop after interpretation, skipping the dialogue
    #[arg(long)]
    no_dialogue: bool,

    /// Write the final argument graph as Graphviz DOT
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    info!("Loading case from: {}", cli.case.display());
    let mut loader = CaseLoader::new();
    let case = match loader.load(&cli.case) {
        Ok(case) => case,
        Err(e) => {
            error!("Failed to load case: {}", e);
            std::process::exit(1);
        }
    };

    let model = match Interpreter::new().run(case) {
        Ok(model) => model,
        Err(e) => {
            error!("Failed to interpret case: {}", e);
            std::process::exit(1);
        }
    };
    for line in model.outputs() {
        println!("{line}");
    }

    let final_set = if cli.no_dialogue {
        model.argument_set().cloned()
    } else {
        match Dialogue::from_model(&model) {
            Ok(dialogue) => {
                let mut dialogue = dialogue.with_depth(cli.depth);
                let verdict = dialogue.run();
                for record in &verdict.turns {
                    let moved = record
                        .added
                        .iter()
                        .map(|id| id.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    println!("turn {}: {} advances {}", record.turn, record.side, moved);
                }
                println!(
                    "verdict: {} wins; {} has no further arguments",
                    verdict.winner, verdict.defaulted
                );
                Some(dialogue.evaluator().argument_set().clone())
            }
            Err(e @ DialogueError::EmptySide { .. }) => {
                info!("Skipping dialogue: {}", e);
                model.argument_set().cloned()
            }
            Err(e) => {
                error!("Dialogue cannot start: {}", e);
                std::process::exit(1);
            }
        }
    };

    if let Some(path) = &cli.export {
        let Some(set) = final_set else {
            info!("No argument set to export");
            return;
        };
        if let Err(e) = std::fs::write(path, set.to_dot()) {
            error!("Failed to export graph: {}", e);
            std::process::exit(1);
        }
        info!("Graph exported to: {}", path.display());
    }
}
