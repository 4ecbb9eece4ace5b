//! The typed symbol table.
//!
//! Bindings are append-only in the sense that a name keeps the tag of
//! its first binding for the lifetime of the table; rebinding under
//! the same tag replaces the value. Every operand lookup and result
//! binding in the interpreter goes through [`SymbolTable::resolve`]
//! and [`SymbolTable::define`].

use std::fmt;

use indexmap::IndexMap;
use thiserror::Error;
use tracing::trace;

use moot_eval::{
    Argument, ArgumentSet, Audience, Evaluator, ProofStandard, Proposition, Standard,
};

/// A value bound in the symbol table.
#[derive(Debug, Clone)]
pub enum Value {
    Proposition(Proposition),
    Argument(Argument),
    ArgumentSet(ArgumentSet),
    Audience(Audience),
    ProofStandard(ProofStandard),
    Evaluator(Evaluator),
    Primitive(Primitive),
}

/// Result of a query call, bindable through a return_variable.
#[derive(Debug, Clone)]
pub enum Primitive {
    Bool(bool),
    Number(f64),
    Standard(Standard),
    Arguments(Vec<Argument>),
}

/// Discriminant of a bound value, checked at every resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Proposition,
    Argument,
    ArgumentSet,
    Audience,
    ProofStandard,
    Evaluator,
    Primitive,
}

impl Value {
    pub fn tag(&self) -> Tag {
        match self {
            Value::Proposition(_) => Tag::Proposition,
            Value::Argument(_) => Tag::Argument,
            Value::ArgumentSet(_) => Tag::ArgumentSet,
            Value::Audience(_) => Tag::Audience,
            Value::ProofStandard(_) => Tag::ProofStandard,
            Value::Evaluator(_) => Tag::Evaluator,
            Value::Primitive(_) => Tag::Primitive,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tag::Proposition => "proposition",
            Tag::Argument => "argument",
            Tag::ArgumentSet => "argument set",
            Tag::Audience => "audience",
            Tag::ProofStandard => "proof standard",
            Tag::Evaluator => "evaluator",
            Tag::Primitive => "primitive result",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Proposition(p) => write!(f, "{p}"),
            Value::Argument(a) => write!(f, "{a}"),
            Value::ArgumentSet(s) => write!(f, "argument set ({} arguments)", s.len()),
            Value::Audience(a) => write!(
                f,
                "audience ({} assumptions, {} weights)",
                a.assumptions().count(),
                a.weights().count()
            ),
            Value::ProofStandard(_) => write!(f, "proof standard assignment"),
            Value::Evaluator(e) => {
                let (alpha, beta, gamma) = e.thresholds();
                write!(f, "evaluator (alpha={alpha}, beta={beta}, gamma={gamma})")
            }
            Value::Primitive(p) => write!(f, "{p}"),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Bool(b) => write!(f, "{b}"),
            Primitive::Number(n) => write!(f, "{n}"),
            Primitive::Standard(s) => write!(f, "{s}"),
            Primitive::Arguments(arguments) => {
                let listed = arguments
                    .iter()
                    .map(|a| format!("{}: {}", a.id, a))
                    .collect::<Vec<_>>()
                    .join("; ");
                write!(f, "[{listed}]")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("undefined symbol {name:?}")]
    Undefined { name: String },
    #[error("symbol {name:?} is bound as {found}, expected {expected}")]
    TypeMismatch {
        name: String,
        expected: Tag,
        found: Tag,
    },
}

/// Binding environment for one interpretation pass.
#[derive(Debug, Default)]
pub struct SymbolTable {
    bindings: IndexMap<String, Value>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Bindings in insertion order, which is declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Binds `name`, holding its tag stable across rebinds.
    pub fn define(&mut self, name: impl Into<String>, value: Value) -> Result<(), SymbolError> {
        let name = name.into();
        if let Some(existing) = self.bindings.get(&name) {
            if existing.tag() != value.tag() {
                return Err(SymbolError::TypeMismatch {
                    expected: existing.tag(),
                    found: value.tag(),
                    name,
                });
            }
        }
        trace!(symbol = %name, tag = %value.tag(), "bind");
        self.bindings.insert(name, value);
        Ok(())
    }

    /// Looks `name` up and checks its tag.
    pub fn resolve(&self, name: &str, expected: Tag) -> Result<&Value, SymbolError> {
        let value = self
            .bindings
            .get(name)
            .ok_or_else(|| SymbolError::Undefined {
                name: name.to_string(),
            })?;
        if value.tag() != expected {
            return Err(SymbolError::TypeMismatch {
                name: name.to_string(),
                expected,
                found: value.tag(),
            });
        }
        Ok(value)
    }

    pub fn proposition(&self, name: &str) -> Result<&Proposition, SymbolError> {
        match self.resolve(name, Tag::Proposition)? {
            Value::Proposition(p) => Ok(p),
            other => Err(self.mismatch(name, Tag::Proposition, other)),
        }
    }

    pub fn argument(&self, name: &str) -> Result<&Argument, SymbolError> {
        match self.resolve(name, Tag::Argument)? {
            Value::Argument(a) => Ok(a),
            other => Err(self.mismatch(name, Tag::Argument, other)),
        }
    }

    pub fn argument_set(&self, name: &str) -> Result<&ArgumentSet, SymbolError> {
        match self.resolve(name, Tag::ArgumentSet)? {
            Value::ArgumentSet(s) => Ok(s),
            other => Err(self.mismatch(name, Tag::ArgumentSet, other)),
        }
    }

    pub fn audience(&self, name: &str) -> Result<&Audience, SymbolError> {
        match self.resolve(name, Tag::Audience)? {
            Value::Audience(a) => Ok(a),
            other => Err(self.mismatch(name, Tag::Audience, other)),
        }
    }

    pub fn proof_standard(&self, name: &str) -> Result<&ProofStandard, SymbolError> {
        match self.resolve(name, Tag::ProofStandard)? {
            Value::ProofStandard(ps) => Ok(ps),
            other => Err(self.mismatch(name, Tag::ProofStandard, other)),
        }
    }

    pub fn evaluator(&self, name: &str) -> Result<&Evaluator, SymbolError> {
        match self.resolve(name, Tag::Evaluator)? {
            Value::Evaluator(e) => Ok(e),
            other => Err(self.mismatch(name, Tag::Evaluator, other)),
        }
    }

    fn mismatch(&self, name: &str, expected: Tag, found: &Value) -> SymbolError {
        SymbolError::TypeMismatch {
            name: name.to_string(),
            expected,
            found: found.tag(),
        }
    }
}
