//! Case document loading.
//!
//! Parsing produces a [`CaseFile`] and nothing else; no semantic
//! checks happen here. A [`CaseLoader`] adds reload semantics on top:
//! it holds at most one case, and loading again discards the prior
//! case entirely before the new document is read.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::command::{ArgValue, CaseFile, Command, CommandArgs, OperationKind};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed case document: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("sequence numbers start at 1")]
    ZeroSequence,
    #[error("command {sequence}: field {field:?} expects {expected}")]
    BadValue {
        sequence: u64,
        field: String,
        expected: &'static str,
    },
}

/// Command body as it appears on the wire. Unrecognized fields are
/// captured, not rejected; the validator owns that decision.
#[derive(Debug, Deserialize)]
struct RawCommand {
    operation_kind: OperationKind,
    function_name: String,
    target_variable: String,
    arguments: serde_yaml::Value,
    #[serde(default)]
    return_variable: Option<String>,
    #[serde(flatten)]
    extra: IndexMap<String, serde_yaml::Value>,
}

/// Parses a case document from text.
pub fn parse_str(text: &str) -> Result<CaseFile, LoadError> {
    let doc: serde_yaml::Value = serde_yaml::from_str(text)?;
    let raw: BTreeMap<u64, RawCommand> = serde_yaml::from_value(doc)?;
    if raw.contains_key(&0) {
        return Err(LoadError::ZeroSequence);
    }
    let mut commands = BTreeMap::new();
    for (sequence, body) in raw {
        commands.insert(sequence, normalize(sequence, body)?);
    }
    Ok(CaseFile { commands })
}

fn normalize(sequence: u64, raw: RawCommand) -> Result<Command, LoadError> {
    let arguments = match &raw.arguments {
        serde_yaml::Value::Null => CommandArgs::None,
        serde_yaml::Value::String(s) if s.eq_ignore_ascii_case("none") => CommandArgs::None,
        serde_yaml::Value::Mapping(entries) => {
            let mut map = IndexMap::new();
            for (key, value) in entries {
                let key = key.as_str().ok_or(LoadError::BadValue {
                    sequence,
                    field: "arguments".to_string(),
                    expected: "string argument names",
                })?;
                let value = ArgValue::from_yaml(value).map_err(|expected| LoadError::BadValue {
                    sequence,
                    field: key.to_string(),
                    expected,
                })?;
                map.insert(key.to_string(), value);
            }
            CommandArgs::Map(map)
        }
        _ => {
            return Err(LoadError::BadValue {
                sequence,
                field: "arguments".to_string(),
                expected: "a mapping or the none marker",
            })
        }
    };
    Ok(Command {
        sequence,
        kind: raw.operation_kind,
        function: raw.function_name,
        target: raw.target_variable,
        arguments,
        returns: raw.return_variable,
        extra_fields: raw.extra.into_keys().collect(),
    })
}

/// Loads case documents from disk and hands out parsed [`CaseFile`]s.
#[derive(Debug, Default)]
pub struct CaseLoader {
    loaded: Option<(PathBuf, CaseFile)>,
}

impl CaseLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and parses the document at `path`, replacing any
    /// previously loaded case. The prior case is dropped before the
    /// new document is opened; on failure the loader is left empty.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<&CaseFile, LoadError> {
        let path = path.as_ref();
        if let Some((prior, _)) = self.loaded.take() {
            info!(prior = %prior.display(), "discarding previously loaded case");
        }
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let case = parse_str(&text)?;
        debug!(path = %path.display(), commands = case.len(), "case loaded");
        let entry = self.loaded.insert((path.to_path_buf(), case));
        Ok(&entry.1)
    }

    /// The currently loaded case, if any.
    pub fn case(&self) -> Option<&CaseFile> {
        self.loaded.as_ref().map(|(_, case)| case)
    }

    /// Source path of the currently loaded case.
    pub fn path(&self) -> Option<&Path> {
        self.loaded.as_ref().map(|(path, _)| path.as_path())
    }
}
