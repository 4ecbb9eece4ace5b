//! Command shape validation against the registry.

use thiserror::Error;

use crate::command::{Command, CommandArgs};
use crate::registry::{self, OperationSpec};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidateError {
    #[error("unknown field {field:?}")]
    UnknownField { field: String },
    #[error("unknown operation {function:?}")]
    UnknownOperation { function: String },
    #[error("operation {function:?} takes no argument {argument:?}")]
    UnknownArgument { function: String, argument: String },
    #[error("operation {function:?} requires argument {argument:?}")]
    MissingArgument { function: String, argument: String },
}

/// Checks one command's shape: recognized fields only, a registered
/// operation, and arguments inside the allowed set covering the
/// required set. Returns the registry entry for dispatch.
pub fn validate(command: &Command) -> Result<&'static OperationSpec, ValidateError> {
    if let Some(field) = command.extra_fields.first() {
        return Err(ValidateError::UnknownField {
            field: field.clone(),
        });
    }
    let spec =
        registry::get(&command.function).ok_or_else(|| ValidateError::UnknownOperation {
            function: command.function.clone(),
        })?;
    if let CommandArgs::Map(supplied) = &command.arguments {
        for argument in supplied.keys() {
            if !spec.allowed.contains(&argument.as_str()) {
                return Err(ValidateError::UnknownArgument {
                    function: command.function.clone(),
                    argument: argument.clone(),
                });
            }
        }
    }
    for &required in spec.required {
        match command.arguments.get(required) {
            Some(value) if !value.is_none() => {}
            _ => {
                return Err(ValidateError::MissingArgument {
                    function: command.function.clone(),
                    argument: required.to_string(),
                })
            }
        }
    }
    Ok(spec)
}
