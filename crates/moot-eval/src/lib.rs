//! Moot argumentation model
//!
//! Carneades-style argument evaluation: propositions with polarity,
//! defeasible arguments, shared argument graphs, audiences, and
//! threshold-based proof standards. The case interpreter and the
//! dialogue search both consume this crate through a narrow query
//! surface ([`Evaluator`], [`ArgumentSet`]).

pub mod argset;
pub mod argument;
pub mod audience;
pub mod evaluator;
pub mod proposition;
pub mod standard;

pub use argset::ArgumentSet;
pub use argument::{Argument, ArgumentId, InvalidSide, Side};
pub use audience::Audience;
pub use evaluator::{Evaluator, DEFAULT_ALPHA, DEFAULT_BETA, DEFAULT_GAMMA};
pub use proposition::Proposition;
pub use standard::{ProofStandard, Standard, UnknownStandard};
