//! Sequence-ordered execution of validated commands.
//!
//! The interpreter validates each command immediately before running
//! it, resolves every operand through the symbol table, and dispatches
//! over the closed [`Operation`] enum. The first failure aborts the
//! pass with the offending sequence number attached.

use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, info};

use moot_eval::{
    Argument, ArgumentId, ArgumentSet, Audience, Evaluator, InvalidSide, ProofStandard,
    Proposition, Side, Standard, UnknownStandard, DEFAULT_ALPHA, DEFAULT_BETA, DEFAULT_GAMMA,
};

use crate::command::{ArgValue, CaseFile, Command, OperationKind};
use crate::registry::Operation;
use crate::symbols::{Primitive, SymbolError, SymbolTable, Value};
use crate::validate::{validate, ValidateError};

#[derive(Debug, Error)]
pub enum InterpretError {
    #[error("command {sequence}: {source}")]
    Validate {
        sequence: u64,
        #[source]
        source: ValidateError,
    },
    #[error("command {sequence}: {source}")]
    Symbol {
        sequence: u64,
        #[source]
        source: SymbolError,
    },
    #[error("command {sequence}: {function:?} is not a constructor")]
    NotAConstructor { sequence: u64, function: String },
    #[error("command {sequence}: {function:?} is not callable")]
    NotCallable { sequence: u64, function: String },
    #[error("command {sequence}: argument {argument:?} expects {expected}")]
    BadArgument {
        sequence: u64,
        argument: &'static str,
        expected: &'static str,
    },
    #[error("command {sequence}: {source}")]
    UnknownStandard {
        sequence: u64,
        #[source]
        source: UnknownStandard,
    },
    #[error("command {sequence}: {source}")]
    InvalidSide {
        sequence: u64,
        #[source]
        source: InvalidSide,
    },
    #[error("command {sequence}: {function:?} produces no result to bind to {variable:?}")]
    NoResult {
        sequence: u64,
        function: String,
        variable: String,
    },
    #[error("command {sequence}: failed to write graph to {path:?}: {source}")]
    Export {
        sequence: u64,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Product of one interpretation pass: the final bindings plus the
/// transcript of discarded call results.
#[derive(Debug, Default)]
pub struct Model {
    symbols: SymbolTable,
    outputs: Vec<String>,
}

impl Model {
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    /// Arguments declared for `side`, in declaration order.
    pub fn side_arguments(&self, side: Side) -> Vec<Argument> {
        self.symbols
            .iter()
            .filter_map(|(_, value)| match value {
                Value::Argument(a) if a.side == Some(side) => Some(a.clone()),
                _ => None,
            })
            .collect()
    }

    /// First declared audience, if the case declared one.
    pub fn audience(&self) -> Option<&Audience> {
        self.symbols.iter().find_map(|(_, value)| match value {
            Value::Audience(a) => Some(a),
            _ => None,
        })
    }

    /// First declared proof-standard assignment.
    pub fn proof_standard(&self) -> Option<&ProofStandard> {
        self.symbols.iter().find_map(|(_, value)| match value {
            Value::ProofStandard(ps) => Some(ps),
            _ => None,
        })
    }

    /// First declared evaluator.
    pub fn evaluator(&self) -> Option<&Evaluator> {
        self.symbols.iter().find_map(|(_, value)| match value {
            Value::Evaluator(e) => Some(e),
            _ => None,
        })
    }

    /// First declared argument set.
    pub fn argument_set(&self) -> Option<&ArgumentSet> {
        self.symbols.iter().find_map(|(_, value)| match value {
            Value::ArgumentSet(s) => Some(s),
            _ => None,
        })
    }
}

/// Executes case files. Each run starts from a fresh symbol table.
#[derive(Debug, Default)]
pub struct Interpreter {
    symbols: SymbolTable,
    outputs: Vec<String>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every command in ascending sequence order and returns the
    /// final model.
    pub fn run(mut self, case: &CaseFile) -> Result<Model, InterpretError> {
        info!(commands = case.len(), "interpreting case");
        for command in case.commands() {
            self.execute(command)?;
        }
        Ok(Model {
            symbols: self.symbols,
            outputs: self.outputs,
        })
    }

    fn execute(&mut self, command: &Command) -> Result<(), InterpretError> {
        let spec = validate(command).map_err(|source| InterpretError::Validate {
            sequence: command.sequence,
            source,
        })?;
        debug!(
            command = command.sequence,
            kind = %command.kind,
            function = %command.function,
            target = %command.target,
            "execute"
        );
        match command.kind {
            OperationKind::Construct => self.construct(command, spec.operation),
            OperationKind::Call => self.call(command, spec.operation),
        }
    }

    fn construct(&mut self, command: &Command, operation: Operation) -> Result<(), InterpretError> {
        let value = match operation {
            Operation::Proposition => {
                let positive = self.bool_arg(command, "polarity")?.unwrap_or(true);
                Value::Proposition(Proposition::new(command.target.as_str(), positive))
            }
            Operation::Argument => {
                let conclusion = self.proposition_arg(command, "conclusion")?;
                let mut argument = Argument::new(command.target.as_str(), conclusion);
                for premise in self.proposition_list_arg(command, "premises")? {
                    argument = argument.premise(premise);
                }
                for exception in self.proposition_list_arg(command, "exceptions")? {
                    argument = argument.exception(exception);
                }
                if let Some(side) = self.side_arg(command)? {
                    argument = argument.advanced_by(side);
                }
                Value::Argument(argument)
            }
            Operation::ArgumentSet => Value::ArgumentSet(ArgumentSet::new()),
            Operation::Audience => {
                let assumptions = self.proposition_list_arg(command, "assumptions")?;
                let weights = self.weights_arg(command)?;
                Value::Audience(Audience::new(assumptions, weights))
            }
            Operation::ProofStandard => {
                Value::ProofStandard(ProofStandard::new(self.standards_arg(command)?))
            }
            Operation::Evaluator => {
                let set_name = self.required_name_arg(command, "argument_set")?;
                let audience_name = self.required_name_arg(command, "audience")?;
                let standards_name = self.required_name_arg(command, "proof_standard")?;
                let argument_set = self
                    .symbols
                    .argument_set(&set_name)
                    .map_err(|e| self.symbol_error(command, e))?
                    .clone();
                let audience = self
                    .symbols
                    .audience(&audience_name)
                    .map_err(|e| self.symbol_error(command, e))?
                    .clone();
                let standards = self
                    .symbols
                    .proof_standard(&standards_name)
                    .map_err(|e| self.symbol_error(command, e))?
                    .clone();
                let alpha = self.number_arg(command, "alpha")?.unwrap_or(DEFAULT_ALPHA);
                let beta = self.number_arg(command, "beta")?.unwrap_or(DEFAULT_BETA);
                let gamma = self.number_arg(command, "gamma")?.unwrap_or(DEFAULT_GAMMA);
                Value::Evaluator(Evaluator::with_thresholds(
                    argument_set,
                    audience,
                    standards,
                    alpha,
                    beta,
                    gamma,
                ))
            }
            _ => {
                return Err(InterpretError::NotAConstructor {
                    sequence: command.sequence,
                    function: command.function.clone(),
                })
            }
        };
        if let Some(variable) = &command.returns {
            return Err(InterpretError::NoResult {
                sequence: command.sequence,
                function: command.function.clone(),
                variable: variable.clone(),
            });
        }
        self.symbols
            .define(command.target.clone(), value)
            .map_err(|e| self.symbol_error(command, e))
    }

    fn call(&mut self, command: &Command, operation: Operation) -> Result<(), InterpretError> {
        let result = match operation {
            Operation::Negate => {
                let receiver = self.receiver_proposition(command)?;
                Some(Value::Proposition(receiver.negate()))
            }
            Operation::AddArgument => {
                let set = self.receiver_argument_set(command)?;
                let name = self.required_name_arg(command, "argument")?;
                let argument = self
                    .symbols
                    .argument(&name)
                    .map_err(|e| self.symbol_error(command, e))?
                    .clone();
                let id = self.optional_name_arg(command, "id")?.map(ArgumentId::from);
                set.add_argument(argument, id);
                None
            }
            Operation::AddProposition => {
                let set = self.receiver_argument_set(command)?;
                let proposition = self.proposition_arg(command, "proposition")?;
                Some(Value::Proposition(set.add_proposition(proposition)))
            }
            Operation::GetArguments => {
                let set = self.receiver_argument_set(command)?;
                let proposition = self.proposition_arg(command, "proposition")?;
                Some(Value::Primitive(Primitive::Arguments(
                    set.get_arguments(&proposition),
                )))
            }
            Operation::Render => {
                let set = self.receiver_argument_set(command)?;
                let verbose = self.bool_arg(command, "debug")?.unwrap_or(false);
                self.outputs.push(set.render(verbose));
                None
            }
            Operation::Export => {
                let set = self.receiver_argument_set(command)?;
                match self.optional_name_arg(command, "path")? {
                    Some(path) => {
                        std::fs::write(&path, set.to_dot()).map_err(|source| {
                            InterpretError::Export {
                                sequence: command.sequence,
                                path: path.clone(),
                                source,
                            }
                        })?;
                        info!(path = %path, "argument graph exported");
                    }
                    None => self.outputs.push(set.to_dot()),
                }
                None
            }
            Operation::GetProofStandard => {
                let standards = self.receiver_proof_standard(command)?;
                let proposition = self.proposition_arg(command, "proposition")?;
                Some(Value::Primitive(Primitive::Standard(
                    standards.standard_for(&proposition),
                )))
            }
            Operation::Acceptable => {
                let evaluator = self.receiver_evaluator(command)?;
                let proposition = self.proposition_arg(command, "proposition")?;
                Some(Value::Primitive(Primitive::Bool(
                    evaluator.acceptable(&proposition),
                )))
            }
            Operation::Applicable => {
                let evaluator = self.receiver_evaluator(command)?;
                let proposition = self.proposition_arg(command, "proposition")?;
                Some(Value::Primitive(Primitive::Bool(
                    evaluator.applicable(&proposition),
                )))
            }
            Operation::GetAllArguments => {
                let evaluator = self.receiver_evaluator(command)?;
                Some(Value::Primitive(Primitive::Arguments(
                    evaluator.all_arguments(),
                )))
            }
            Operation::MaxWeightApplicable => {
                let evaluator = self.receiver_evaluator(command)?;
                let arguments = self.argument_list_arg(command, "arguments")?;
                Some(Value::Primitive(Primitive::Number(
                    evaluator.max_weight_applicable(&arguments),
                )))
            }
            Operation::MaxWeightCon => {
                let evaluator = self.receiver_evaluator(command)?;
                let proposition = self.proposition_arg(command, "proposition")?;
                Some(Value::Primitive(Primitive::Number(
                    evaluator.max_weight_con(&proposition),
                )))
            }
            Operation::MaxWeightPro => {
                let evaluator = self.receiver_evaluator(command)?;
                let proposition = self.proposition_arg(command, "proposition")?;
                Some(Value::Primitive(Primitive::Number(
                    evaluator.max_weight_pro(&proposition),
                )))
            }
            Operation::MeetsProofStandard => {
                let evaluator = self.receiver_evaluator(command)?;
                let proposition = self.proposition_arg(command, "proposition")?;
                let standard = self.standard_arg(command)?;
                Some(Value::Primitive(Primitive::Bool(
                    evaluator.meets_proof_standard(&proposition, standard),
                )))
            }
            Operation::WeightOf => {
                let evaluator = self.receiver_evaluator(command)?;
                let name = self.required_name_arg(command, "argument")?;
                let argument = self
                    .symbols
                    .argument(&name)
                    .map_err(|e| self.symbol_error(command, e))?
                    .clone();
                Some(Value::Primitive(Primitive::Number(
                    evaluator.weight_of(&argument),
                )))
            }
            _ => {
                return Err(InterpretError::NotCallable {
                    sequence: command.sequence,
                    function: command.function.clone(),
                })
            }
        };
        self.finish_call(command, result)
    }

    fn finish_call(
        &mut self,
        command: &Command,
        result: Option<Value>,
    ) -> Result<(), InterpretError> {
        match (&command.returns, result) {
            (Some(variable), Some(value)) => self
                .symbols
                .define(variable.clone(), value)
                .map_err(|e| self.symbol_error(command, e)),
            (Some(variable), None) => Err(InterpretError::NoResult {
                sequence: command.sequence,
                function: command.function.clone(),
                variable: variable.clone(),
            }),
            (None, Some(value)) => {
                self.outputs.push(value.to_string());
                Ok(())
            }
            (None, None) => Ok(()),
        }
    }

    // --- receivers -------------------------------------------------------

    fn receiver_proposition(&self, command: &Command) -> Result<Proposition, InterpretError> {
        self.symbols
            .proposition(&command.target)
            .map(|p| p.clone())
            .map_err(|e| self.symbol_error(command, e))
    }

    fn receiver_argument_set(&self, command: &Command) -> Result<ArgumentSet, InterpretError> {
        // handle clone: mutations stay visible through the symbol
        self.symbols
            .argument_set(&command.target)
            .map(|s| s.clone())
            .map_err(|e| self.symbol_error(command, e))
    }

    fn receiver_proof_standard(&self, command: &Command) -> Result<ProofStandard, InterpretError> {
        self.symbols
            .proof_standard(&command.target)
            .map(|ps| ps.clone())
            .map_err(|e| self.symbol_error(command, e))
    }

    fn receiver_evaluator(&self, command: &Command) -> Result<Evaluator, InterpretError> {
        self.symbols
            .evaluator(&command.target)
            .map(|e| e.clone())
            .map_err(|e| self.symbol_error(command, e))
    }

    // --- argument extraction ---------------------------------------------

    fn arg<'c>(&self, command: &'c Command, name: &str) -> Option<&'c ArgValue> {
        command.arguments.get(name).filter(|value| !value.is_none())
    }

    fn bool_arg(
        &self,
        command: &Command,
        name: &'static str,
    ) -> Result<Option<bool>, InterpretError> {
        match self.arg(command, name) {
            None => Ok(None),
            Some(ArgValue::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(self.bad_argument(command, name, "a boolean")),
        }
    }

    fn number_arg(
        &self,
        command: &Command,
        name: &'static str,
    ) -> Result<Option<f64>, InterpretError> {
        match self.arg(command, name) {
            None => Ok(None),
            Some(ArgValue::Number(n)) => Ok(Some(*n)),
            Some(_) => Err(self.bad_argument(command, name, "a number")),
        }
    }

    fn required_name_arg(
        &self,
        command: &Command,
        name: &'static str,
    ) -> Result<String, InterpretError> {
        match self.arg(command, name) {
            Some(ArgValue::Name(value)) => Ok(value.clone()),
            _ => Err(self.bad_argument(command, name, "a name")),
        }
    }

    fn optional_name_arg(
        &self,
        command: &Command,
        name: &'static str,
    ) -> Result<Option<String>, InterpretError> {
        match self.arg(command, name) {
            None => Ok(None),
            Some(ArgValue::Name(value)) => Ok(Some(value.clone())),
            Some(_) => Err(self.bad_argument(command, name, "a name")),
        }
    }

    fn proposition_arg(
        &self,
        command: &Command,
        name: &'static str,
    ) -> Result<Proposition, InterpretError> {
        let symbol = self.required_name_arg(command, name)?;
        self.symbols
            .proposition(&symbol)
            .map(|p| p.clone())
            .map_err(|e| self.symbol_error(command, e))
    }

    /// Resolves a name list to bound propositions; an omitted list is
    /// empty.
    fn proposition_list_arg(
        &self,
        command: &Command,
        name: &'static str,
    ) -> Result<Vec<Proposition>, InterpretError> {
        match self.arg(command, name) {
            None => Ok(Vec::new()),
            Some(ArgValue::Names(names)) => names
                .iter()
                .map(|n| {
                    self.symbols
                        .proposition(n)
                        .map(|p| p.clone())
                        .map_err(|e| self.symbol_error(command, e))
                })
                .collect(),
            Some(_) => Err(self.bad_argument(command, name, "a list of proposition names")),
        }
    }

    fn argument_list_arg(
        &self,
        command: &Command,
        name: &'static str,
    ) -> Result<Vec<Argument>, InterpretError> {
        match self.arg(command, name) {
            Some(ArgValue::Names(names)) => names
                .iter()
                .map(|n| {
                    self.symbols
                        .argument(n)
                        .map(|a| a.clone())
                        .map_err(|e| self.symbol_error(command, e))
                })
                .collect(),
            _ => Err(self.bad_argument(command, name, "a list of argument names")),
        }
    }

    /// Audience weights key raw argument ids, so re-keyed graph copies
    /// stay weighable; values must be numbers.
    fn weights_arg(&self, command: &Command) -> Result<Vec<(ArgumentId, f64)>, InterpretError> {
        match self.arg(command, "weights") {
            Some(ArgValue::Table(table)) => {
                let mut weights = Vec::with_capacity(table.len());
                for (name, value) in table {
                    let ArgValue::Number(weight) = value else {
                        return Err(self.bad_argument(command, "weights", "numeric weights"));
                    };
                    weights.push((ArgumentId::from(name.as_str()), *weight));
                }
                Ok(weights)
            }
            _ => Err(self.bad_argument(command, "weights", "a table of argument weights")),
        }
    }

    /// Standard assignments key bound propositions, so polarity is
    /// part of the assignment.
    fn standards_arg(
        &self,
        command: &Command,
    ) -> Result<Vec<(Proposition, Standard)>, InterpretError> {
        match self.arg(command, "standards") {
            Some(ArgValue::Table(table)) => {
                let mut standards = Vec::with_capacity(table.len());
                for (name, value) in table {
                    let ArgValue::Name(standard) = value else {
                        return Err(self.bad_argument(command, "standards", "standard names"));
                    };
                    let standard = Standard::from_str(standard).map_err(|source| {
                        InterpretError::UnknownStandard {
                            sequence: command.sequence,
                            source,
                        }
                    })?;
                    let proposition = self
                        .symbols
                        .proposition(name)
                        .map(|p| p.clone())
                        .map_err(|e| self.symbol_error(command, e))?;
                    standards.push((proposition, standard));
                }
                Ok(standards)
            }
            _ => Err(self.bad_argument(command, "standards", "a table of proposition standards")),
        }
    }

    fn standard_arg(&self, command: &Command) -> Result<Standard, InterpretError> {
        let name = self.required_name_arg(command, "standard")?;
        name.parse()
            .map_err(|source| InterpretError::UnknownStandard {
                sequence: command.sequence,
                source,
            })
    }

    fn side_arg(&self, command: &Command) -> Result<Option<Side>, InterpretError> {
        match self.arg(command, "side") {
            None => Ok(None),
            Some(ArgValue::Name(side)) => Side::from_str(side).map(Some).map_err(|source| {
                InterpretError::InvalidSide {
                    sequence: command.sequence,
                    source,
                }
            }),
            Some(_) => Err(self.bad_argument(command, "side", "prosecution or defense")),
        }
    }

    fn symbol_error(&self, command: &Command, source: SymbolError) -> InterpretError {
        InterpretError::Symbol {
            sequence: command.sequence,
            source,
        }
    }

    fn bad_argument(
        &self,
        command: &Command,
        argument: &'static str,
        expected: &'static str,
    ) -> InterpretError {
        InterpretError::BadArgument {
            sequence: command.sequence,
            argument,
            expected,
        }
    }
}
