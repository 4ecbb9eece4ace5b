//! Atomic statements with polarity.

use std::fmt;

/// An atomic statement that arguments conclude, depend on, or except.
///
/// Two propositions denote the same statement only when both text and
/// polarity match; `p` and `-p` are distinct nodes that negate each
/// other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Proposition {
    text: String,
    positive: bool,
}

impl Proposition {
    pub fn new(text: impl Into<String>, positive: bool) -> Self {
        Self {
            text: text.into(),
            positive,
        }
    }

    /// The positive-polarity statement of `text`.
    pub fn positive(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_positive(&self) -> bool {
        self.positive
    }

    /// The same statement with opposite polarity.
    pub fn negate(&self) -> Self {
        Self {
            text: self.text.clone(),
            positive: !self.positive,
        }
    }
}

impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.positive {
            write!(f, "{}", self.text)
        } else {
            write!(f, "-{}", self.text)
        }
    }
}
