//! Case documents and their execution.
//!
//! A case is a YAML document of numbered commands over the evaluation
//! model in `moot-eval`. This crate loads a document into a
//! [`CaseFile`](command::CaseFile), validates each command against the
//! closed operation registry, and interprets the commands in sequence
//! order against a typed symbol table.
//!
//! Loading, validation, and interpretation are deliberately separate
//! passes with separate error types, so a caller can report document
//! problems without ever constructing model objects.

pub mod command;
pub mod interpret;
pub mod loader;
pub mod registry;
pub mod symbols;
pub mod validate;

pub use command::{ArgValue, CaseFile, Command, CommandArgs, OperationKind};
pub use interpret::{Interpreter, InterpretError, Model};
pub use loader::{parse_str, CaseLoader, LoadError};
pub use registry::{Operation, OperationSpec};
pub use symbols::{Primitive, SymbolError, SymbolTable, Tag, Value};
pub use validate::{validate, ValidateError};
