//! Depth-bounded search for a committing move.
//!
//! A turn tries combinations of pool arguments against a snapshot of
//! the shared graph. Combinations are visited in lexicographic order
//! over the pool's existing order and each combination is grown one
//! argument at a time, so the committed move is the shortest accepting
//! prefix of the earliest sufficient combination. For a fixed pool and
//! graph the outcome is fully deterministic.

use itertools::Itertools;
use tracing::{debug, trace};

use moot_eval::{Argument, ArgumentId, Evaluator, Proposition};

/// A successful move: an evaluator over the extended graph plus the
/// pool arguments the move consumed.
#[derive(Debug, Clone)]
pub struct TurnCommit {
    pub evaluator: Evaluator,
    pub used: Vec<ArgumentId>,
}

/// Outcome of one side's turn. Exhaustion is a normal result, not a
/// failure.
#[derive(Debug, Clone)]
pub enum TurnOutcome {
    Committed(TurnCommit),
    Exhausted,
}

/// Searches for the smallest accepting prefix of a combination of pool
/// arguments. The base evaluator's graph is never mutated; every
/// attempt works on its own snapshot.
pub fn search_turn(
    evaluator: &Evaluator,
    pool: &[Argument],
    target: &Proposition,
    depth: usize,
) -> TurnOutcome {
    let depth = depth.min(pool.len());
    if depth == 0 {
        return TurnOutcome::Exhausted;
    }
    let (alpha, beta, gamma) = evaluator.thresholds();
    for combination in pool.iter().combinations(depth) {
        let candidate = evaluator.argument_set().snapshot();
        let mut used = Vec::with_capacity(depth);
        for argument in combination {
            candidate.add_argument(argument.clone(), None);
            used.push(argument.id.clone());
            let attempt = Evaluator::with_thresholds(
                candidate.clone(),
                evaluator.audience().clone(),
                evaluator.standards().clone(),
                alpha,
                beta,
                gamma,
            );
            if attempt.acceptable(target) {
                debug!(target = %target, moved = used.len(), "accepting prefix found");
                return TurnOutcome::Committed(TurnCommit {
                    evaluator: attempt,
                    used,
                });
            }
            trace!(argument = %argument.id, "prefix insufficient");
        }
    }
    TurnOutcome::Exhausted
}
