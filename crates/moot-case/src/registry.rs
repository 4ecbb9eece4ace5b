//! The closed operation registry.
//!
//! Every operation a case document may name, with the argument shape
//! the validator enforces. The table is immutable and consulted only
//! through the lookup functions; the [`Operation`] enum gives the
//! interpreter an exhaustively matched dispatch target for each entry.

use crate::command::OperationKind;

/// Every operation a case document may invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Proposition,
    Argument,
    ArgumentSet,
    Audience,
    ProofStandard,
    Evaluator,
    Negate,
    AddArgument,
    AddProposition,
    GetArguments,
    Render,
    Export,
    GetProofStandard,
    Acceptable,
    Applicable,
    GetAllArguments,
    MaxWeightApplicable,
    MaxWeightCon,
    MaxWeightPro,
    MeetsProofStandard,
    WeightOf,
}

/// Shape of one registered operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSpec {
    pub name: &'static str,
    pub operation: Operation,
    pub kind: OperationKind,
    pub allowed: &'static [&'static str],
    pub required: &'static [&'static str],
}

/// The registry, in catalog order: constructors first, then calls.
pub static OPERATIONS: &[OperationSpec] = &[
    OperationSpec {
        name: "Proposition",
        operation: Operation::Proposition,
        kind: OperationKind::Construct,
        allowed: &["polarity"],
        required: &[],
    },
    OperationSpec {
        name: "Argument",
        operation: Operation::Argument,
        kind: OperationKind::Construct,
        allowed: &["conclusion", "premises", "exceptions", "side"],
        required: &["conclusion"],
    },
    OperationSpec {
        name: "ArgumentSet",
        operation: Operation::ArgumentSet,
        kind: OperationKind::Construct,
        allowed: &[],
        required: &[],
    },
    OperationSpec {
        name: "Audience",
        operation: Operation::Audience,
        kind: OperationKind::Construct,
        allowed: &["assumptions", "weights"],
        required: &["assumptions", "weights"],
    },
    OperationSpec {
        name: "ProofStandard",
        operation: Operation::ProofStandard,
        kind: OperationKind::Construct,
        allowed: &["standards"],
        required: &["standards"],
    },
    OperationSpec {
        name: "Evaluator",
        operation: Operation::Evaluator,
        kind: OperationKind::Construct,
        allowed: &[
            "argument_set",
            "audience",
            "proof_standard",
            "alpha",
            "beta",
            "gamma",
        ],
        required: &["argument_set", "audience", "proof_standard"],
    },
    OperationSpec {
        name: "negate",
        operation: Operation::Negate,
        kind: OperationKind::Call,
        allowed: &[],
        required: &[],
    },
    OperationSpec {
        name: "add_argument",
        operation: Operation::AddArgument,
        kind: OperationKind::Call,
        allowed: &["argument", "id"],
        required: &["argument"],
    },
    OperationSpec {
        name: "add_proposition",
        operation: Operation::AddProposition,
        kind: OperationKind::Call,
        allowed: &["proposition"],
        required: &["proposition"],
    },
    OperationSpec {
        name: "get_arguments",
        operation: Operation::GetArguments,
        kind: OperationKind::Call,
        allowed: &["proposition"],
        required: &["proposition"],
    },
    OperationSpec {
        name: "render",
        operation: Operation::Render,
        kind: OperationKind::Call,
        allowed: &["debug"],
        required: &[],
    },
    OperationSpec {
        name: "export",
        operation: Operation::Export,
        kind: OperationKind::Call,
        allowed: &["path"],
        required: &[],
    },
    OperationSpec {
        name: "get_proof_standard",
        operation: Operation::GetProofStandard,
        kind: OperationKind::Call,
        allowed: &["proposition"],
        required: &["proposition"],
    },
    OperationSpec {
        name: "acceptable",
        operation: Operation::Acceptable,
        kind: OperationKind::Call,
        allowed: &["proposition"],
        required: &["proposition"],
    },
    OperationSpec {
        name: "applicable",
        operation: Operation::Applicable,
        kind: OperationKind::Call,
        allowed: &["proposition"],
        required: &["proposition"],
    },
    OperationSpec {
        name: "get_all_arguments",
        operation: Operation::GetAllArguments,
        kind: OperationKind::Call,
        allowed: &[],
        required: &[],
    },
    OperationSpec {
        name: "max_weight_applicable",
        operation: Operation::MaxWeightApplicable,
        kind: OperationKind::Call,
        allowed: &["arguments"],
        required: &["arguments"],
    },
    OperationSpec {
        name: "max_weight_con",
        operation: Operation::MaxWeightCon,
        kind: OperationKind::Call,
        allowed: &["proposition"],
        required: &["proposition"],
    },
    OperationSpec {
        name: "max_weight_pro",
        operation: Operation::MaxWeightPro,
        kind: OperationKind::Call,
        allowed: &["proposition"],
        required: &["proposition"],
    },
    OperationSpec {
        name: "meets_proof_standard",
        operation: Operation::MeetsProofStandard,
        kind: OperationKind::Call,
        allowed: &["proposition", "standard"],
        required: &["proposition", "standard"],
    },
    OperationSpec {
        name: "weight_of",
        operation: Operation::WeightOf,
        kind: OperationKind::Call,
        allowed: &["argument"],
        required: &["argument"],
    },
];

/// Looks up an operation by its registered name.
pub fn get(name: &str) -> Option<&'static OperationSpec> {
    OPERATIONS.iter().find(|spec| spec.name == name)
}

pub fn is_known(name: &str) -> bool {
    get(name).is_some()
}

/// All registered names, in catalog order.
pub fn all_names() -> Vec<&'static str> {
    OPERATIONS.iter().map(|spec| spec.name).collect()
}
