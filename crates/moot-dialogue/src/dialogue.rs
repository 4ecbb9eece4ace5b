//! The adversarial loop over a shared argument graph.
//!
//! Both sides hold a pool of reserve arguments and a target
//! proposition. The burden of proof sits with exactly one side at a
//! time; whenever the holder's target is already acceptable the burden
//! flips, and the holder then searches its pool for a committing move.
//! A side whose search exhausts loses by default, so the dialogue
//! always terminates: every committed turn permanently drains the
//! mover's pool.

use thiserror::Error;
use tracing::{debug, info};

use moot_case::Model;
use moot_eval::{
    Argument, ArgumentId, ArgumentSet, Evaluator, Proposition, Side, DEFAULT_ALPHA, DEFAULT_BETA,
    DEFAULT_GAMMA,
};

use crate::search::{search_turn, TurnOutcome};

/// Combinations per turn are capped at this size unless overridden.
pub const DEFAULT_SEARCH_DEPTH: usize = 4;

#[derive(Debug, Error)]
pub enum DialogueError {
    #[error("case declares no audience")]
    MissingAudience,
    #[error("case declares no proof standard assignment")]
    MissingProofStandard,
    #[error("case declares no arguments for {side}")]
    EmptySide { side: Side },
}

/// One committed turn: who moved and which pool arguments entered the
/// shared graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRecord {
    pub turn: usize,
    pub side: Side,
    pub added: Vec<ArgumentId>,
}

/// Final outcome: the side whose position stood, the side that ran out
/// of moves, and the turn transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub winner: Side,
    pub defaulted: Side,
    pub turns: Vec<TurnRecord>,
}

#[derive(Debug, Clone)]
struct SideState {
    pool: Vec<Argument>,
    target: Proposition,
}

impl SideState {
    /// Splits a side's declared arguments into its opening move and
    /// the reserve pool; the opener's conclusion is the side's target.
    fn from_model(model: &Model, side: Side) -> Result<(Self, Argument), DialogueError> {
        let mut pool = model.side_arguments(side);
        if pool.is_empty() {
            return Err(DialogueError::EmptySide { side });
        }
        let opener = pool.remove(0);
        let target = opener.conclusion.clone();
        Ok((Self { pool, target }, opener))
    }
}

/// Burden-of-proof dialogue between the two sides of an interpreted
/// case.
#[derive(Debug)]
pub struct Dialogue {
    evaluator: Evaluator,
    burden: Side,
    depth: usize,
    prosecution: SideState,
    defense: SideState,
}

impl Dialogue {
    /// Wires a dialogue from an interpreted case: both sides' opening
    /// arguments seed the shared graph, the document's audience and
    /// proof standards govern evaluation, and thresholds follow the
    /// document's evaluator when one was declared.
    pub fn from_model(model: &Model) -> Result<Self, DialogueError> {
        let audience = model
            .audience()
            .cloned()
            .ok_or(DialogueError::MissingAudience)?;
        let standards = model
            .proof_standard()
            .cloned()
            .ok_or(DialogueError::MissingProofStandard)?;
        let (alpha, beta, gamma) = model
            .evaluator()
            .map(Evaluator::thresholds)
            .unwrap_or((DEFAULT_ALPHA, DEFAULT_BETA, DEFAULT_GAMMA));

        let (prosecution, pro_opener) = SideState::from_model(model, Side::Prosecution)?;
        let (defense, def_opener) = SideState::from_model(model, Side::Defense)?;
        let opening = ArgumentSet::new();
        opening.add_argument(pro_opener, None);
        opening.add_argument(def_opener, None);

        info!(
            prosecution_reserve = prosecution.pool.len(),
            defense_reserve = defense.pool.len(),
            "dialogue opened"
        );
        Ok(Self {
            evaluator: Evaluator::with_thresholds(
                opening, audience, standards, alpha, beta, gamma,
            ),
            burden: Side::Defense,
            depth: DEFAULT_SEARCH_DEPTH,
            prosecution,
            defense,
        })
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn burden(&self) -> Side {
        self.burden
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    fn side(&self, side: Side) -> &SideState {
        match side {
            Side::Prosecution => &self.prosecution,
            Side::Defense => &self.defense,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut SideState {
        match side {
            Side::Prosecution => &mut self.prosecution,
            Side::Defense => &mut self.defense,
        }
    }

    /// Runs the dialogue to its verdict. The final graph stays
    /// reachable through [`Dialogue::evaluator`].
    pub fn run(&mut self) -> Verdict {
        let mut turns = Vec::new();
        loop {
            if self.evaluator.acceptable(&self.side(self.burden).target) {
                debug!(from = %self.burden, "burden satisfied, shifting");
                self.burden = self.burden.opponent();
            }
            let holder = self.burden;
            let outcome = {
                let state = self.side(holder);
                search_turn(&self.evaluator, &state.pool, &state.target, self.depth)
            };
            match outcome {
                TurnOutcome::Committed(commit) => {
                    let turn = turns.len() + 1;
                    info!(turn, side = %holder, moved = commit.used.len(), "turn committed");
                    self.evaluator = commit.evaluator;
                    self.side_mut(holder)
                        .pool
                        .retain(|argument| !commit.used.contains(&argument.id));
                    turns.push(TurnRecord {
                        turn,
                        side: holder,
                        added: commit.used,
                    });
                }
                TurnOutcome::Exhausted => {
                    let winner = holder.opponent();
                    info!(
                        winner = %winner,
                        defaulted = %holder,
                        turns = turns.len(),
                        "dialogue closed"
                    );
                    return Verdict {
                        winner,
                        defaulted: holder,
                        turns,
                    };
                }
            }
        }
    }
}
