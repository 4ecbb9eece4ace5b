//! Defeasible arguments and the parties that advance them.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;
use thiserror::Error;

use crate::Proposition;

/// Identifier an audience uses to weigh an argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArgumentId(String);

impl ArgumentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArgumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ArgumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ArgumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A party to an adversarial dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Prosecution,
    Defense,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Prosecution => Side::Defense,
            Side::Defense => Side::Prosecution,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Prosecution => write!(f, "prosecution"),
            Side::Defense => write!(f, "defense"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("invalid side: {0:?} (expected prosecution or defense)")]
pub struct InvalidSide(pub String);

impl FromStr for Side {
    type Err = InvalidSide;

    fn from_str(s: &str) -> Result<Self, InvalidSide> {
        match s.to_ascii_lowercase().as_str() {
            "prosecution" => Ok(Side::Prosecution),
            "defense" => Ok(Side::Defense),
            _ => Err(InvalidSide(s.to_string())),
        }
    }
}

/// A defeasible argument: if every premise holds and no exception
/// holds, the conclusion follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub id: ArgumentId,
    pub conclusion: Proposition,
    pub premises: IndexSet<Proposition>,
    pub exceptions: IndexSet<Proposition>,
    /// Party that declared the argument, when the case assigns one.
    pub side: Option<Side>,
}

impl Argument {
    pub fn new(id: impl Into<ArgumentId>, conclusion: Proposition) -> Self {
        Self {
            id: id.into(),
            conclusion,
            premises: IndexSet::new(),
            exceptions: IndexSet::new(),
            side: None,
        }
    }

    pub fn premise(mut self, premise: Proposition) -> Self {
        self.premises.insert(premise);
        self
    }

    pub fn exception(mut self, exception: Proposition) -> Self {
        self.exceptions.insert(exception);
        self
    }

    pub fn advanced_by(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = |props: &IndexSet<Proposition>| {
            props
                .iter()
                .map(Proposition::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        write!(
            f,
            "[{}], ~[{}] => {}",
            list(&self.premises),
            list(&self.exceptions),
            self.conclusion
        )
    }
}
