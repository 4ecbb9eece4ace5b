//! Case commands as parsed from a document.

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;

/// Whether a command constructs a domain object or invokes a
/// capability on one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Construct,
    Call,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Construct => write!(f, "construct"),
            OperationKind::Call => write!(f, "call"),
        }
    }
}

/// One argument value as written in a document.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// Explicit absence: YAML `null` or the `none` marker.
    None,
    Bool(bool),
    Number(f64),
    /// A symbol name, standard name, side, or file path.
    Name(String),
    /// A list of symbol names.
    Names(Vec<String>),
    /// A nested name→value table (audience weights, standard
    /// assignments).
    Table(IndexMap<String, ArgValue>),
}

impl ArgValue {
    /// Whether the value is the explicit "present but empty" marker.
    pub fn is_none(&self) -> bool {
        match self {
            ArgValue::None => true,
            ArgValue::Name(name) => name.eq_ignore_ascii_case("none"),
            _ => false,
        }
    }

    /// Normalizes a raw YAML value; the error names the shape that was
    /// expected instead.
    pub(crate) fn from_yaml(value: &serde_yaml::Value) -> Result<ArgValue, &'static str> {
        match value {
            serde_yaml::Value::Null => Ok(ArgValue::None),
            serde_yaml::Value::Bool(b) => Ok(ArgValue::Bool(*b)),
            serde_yaml::Value::Number(n) => {
                n.as_f64().map(ArgValue::Number).ok_or("a finite number")
            }
            serde_yaml::Value::String(s) => Ok(ArgValue::Name(s.clone())),
            serde_yaml::Value::Sequence(items) => items
                .iter()
                .map(|item| item.as_str().map(String::from).ok_or("a list of names"))
                .collect::<Result<Vec<_>, _>>()
                .map(ArgValue::Names),
            serde_yaml::Value::Mapping(entries) => {
                let mut table = IndexMap::new();
                for (key, value) in entries {
                    let key = key.as_str().ok_or("string table keys")?;
                    table.insert(key.to_string(), ArgValue::from_yaml(value)?);
                }
                Ok(ArgValue::Table(table))
            }
            serde_yaml::Value::Tagged(_) => Err("a plain value"),
        }
    }
}

/// A command's argument block: the explicit none marker or a
/// name→value table.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CommandArgs {
    #[default]
    None,
    Map(IndexMap<String, ArgValue>),
}

impl CommandArgs {
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        match self {
            CommandArgs::None => None,
            CommandArgs::Map(map) => map.get(name),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        let map = match self {
            CommandArgs::None => None,
            CommandArgs::Map(map) => Some(map),
        };
        map.into_iter().flat_map(|m| m.keys().map(String::as_str))
    }
}

/// A single numbered instruction.
#[derive(Debug, Clone)]
pub struct Command {
    pub sequence: u64,
    pub kind: OperationKind,
    pub function: String,
    pub target: String,
    pub arguments: CommandArgs,
    pub returns: Option<String>,
    /// Top-level fields outside the recognized set, preserved for the
    /// validator to reject.
    pub extra_fields: Vec<String>,
}

/// A parsed case document: commands keyed by sequence number.
///
/// Iteration is in ascending sequence order, which is the
/// authoritative execution order regardless of document layout.
#[derive(Debug, Clone, Default)]
pub struct CaseFile {
    pub(crate) commands: BTreeMap<u64, Command>,
}

impl CaseFile {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn get(&self, sequence: u64) -> Option<&Command> {
        self.commands.get(&sequence)
    }

    /// Commands in ascending sequence order.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }
}
