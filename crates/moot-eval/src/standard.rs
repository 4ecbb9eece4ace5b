//! Proof standards and their per-proposition assignment.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use thiserror::Error;

use crate::Proposition;

/// How strongly a proposition must be supported before it counts as
/// accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Standard {
    /// At least one applicable supporting argument.
    #[default]
    Scintilla,
    /// The strongest applicable pro argument outweighs the strongest
    /// con.
    Preponderance,
    /// Preponderance with strength and margin thresholds.
    ClearAndConvincing,
    /// Clear and convincing, and the opposition stays weak.
    BeyondReasonableDoubt,
    /// Some applicable pro argument and no applicable con argument.
    DialecticalValidity,
}

impl Standard {
    pub fn name(self) -> &'static str {
        match self {
            Standard::Scintilla => "scintilla",
            Standard::Preponderance => "preponderance",
            Standard::ClearAndConvincing => "clear_and_convincing",
            Standard::BeyondReasonableDoubt => "beyond_reasonable_doubt",
            Standard::DialecticalValidity => "dialectical_validity",
        }
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Error)]
#[error("unknown proof standard: {0:?}")]
pub struct UnknownStandard(pub String);

impl FromStr for Standard {
    type Err = UnknownStandard;

    fn from_str(s: &str) -> Result<Self, UnknownStandard> {
        match s {
            "scintilla" => Ok(Standard::Scintilla),
            "preponderance" => Ok(Standard::Preponderance),
            "clear_and_convincing" => Ok(Standard::ClearAndConvincing),
            "beyond_reasonable_doubt" => Ok(Standard::BeyondReasonableDoubt),
            "dialectical_validity" => Ok(Standard::DialecticalValidity),
            _ => Err(UnknownStandard(s.to_string())),
        }
    }
}

/// Per-proposition standard assignment. Unassigned propositions answer
/// to scintilla.
#[derive(Debug, Clone, Default)]
pub struct ProofStandard {
    assigned: IndexMap<Proposition, Standard>,
}

impl ProofStandard {
    pub fn new(pairs: impl IntoIterator<Item = (Proposition, Standard)>) -> Self {
        Self {
            assigned: pairs.into_iter().collect(),
        }
    }

    pub fn assign(&mut self, proposition: Proposition, standard: Standard) {
        self.assigned.insert(proposition, standard);
    }

    pub fn standard_for(&self, p: &Proposition) -> Standard {
        self.assigned.get(p).copied().unwrap_or_default()
    }
}
