//! Integration test harness for the case pipeline.
//!
//! This crate provides utilities for end-to-end testing of the full
//! pipeline: Parse → Validate → Interpret → Dialogue → Verdict.

use moot_case::{parse_str, Interpreter, Model, Primitive, Tag, Value};
use moot_dialogue::{Dialogue, Verdict, DEFAULT_SEARCH_DEPTH};

/// Test harness for interpreting case documents from YAML source.
pub struct TestHarness {
    model: Model,
}

impl TestHarness {
    /// Create a new test harness from YAML case source.
    ///
    /// # Panics
    ///
    /// Panics if parsing or interpretation fails.
    pub fn from_source(source: &str) -> Self {
        let case = match parse_str(source) {
            Ok(case) => case,
            Err(e) => panic!("Parsing failed: {e}"),
        };
        let model = match Interpreter::new().run(&case) {
            Ok(model) => model,
            Err(e) => panic!("Interpretation failed: {e}"),
        };
        Self { model }
    }

    /// Get the interpreted model.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Lines produced by discarded call results, in execution order.
    pub fn outputs(&self) -> &[String] {
        self.model.outputs()
    }

    /// Get a boolean bound by a `return_variable`.
    pub fn bool_result(&self, name: &str) -> Option<bool> {
        match self.model.symbols().resolve(name, Tag::Primitive).ok()? {
            Value::Primitive(Primitive::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Get a number bound by a `return_variable`.
    pub fn number_result(&self, name: &str) -> Option<f64> {
        match self.model.symbols().resolve(name, Tag::Primitive).ok()? {
            Value::Primitive(Primitive::Number(n)) => Some(*n),
            _ => None,
        }
    }

    /// Run the burden-of-proof dialogue at the default search depth.
    ///
    /// # Panics
    ///
    /// Panics if the case cannot be wired into a dialogue.
    pub fn verdict(&self) -> Verdict {
        self.verdict_with_depth(DEFAULT_SEARCH_DEPTH)
    }

    /// Run the dialogue with an explicit search depth.
    ///
    /// # Panics
    ///
    /// Panics if the case cannot be wired into a dialogue.
    pub fn verdict_with_depth(&self, depth: usize) -> Verdict {
        match Dialogue::from_model(&self.model) {
            Ok(dialogue) => dialogue.with_depth(depth).run(),
            Err(e) => panic!("Dialogue wiring failed: {e}"),
        }
    }
}
