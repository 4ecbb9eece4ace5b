//! Burden-of-proof dialogue between the two sides of a case.
//!
//! An interpreted case yields argument pools for the prosecution and
//! the defense. The dialogue seeds a shared graph with both opening
//! arguments and then lets the burdened side search its reserve for
//! moves until one side exhausts, which settles the verdict.

pub mod dialogue;
pub mod search;

pub use dialogue::{Dialogue, DialogueError, TurnRecord, Verdict, DEFAULT_SEARCH_DEPTH};
pub use search::{search_turn, TurnCommit, TurnOutcome};
