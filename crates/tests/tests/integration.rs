//! Integration tests for end-to-end case execution.
//!
//! These tests verify the full pipeline:
//! Load case → Validate → Interpret → Dialogue → Verdict

use moot_case::{parse_str, CaseLoader, InterpretError, Interpreter, ValidateError};
use moot_dialogue::TurnRecord;
use moot_eval::{ArgumentId, Side};
use moot_tests::TestHarness;

/// A murder trial where the prosecution's only argument is defeated
/// by an assumed exception. The defense's counter-claim is therefore
/// unopposed, and the prosecution has nothing left to advance.
const SEARCH_CASE: &str = "
1:
  operation_kind: construct
  function_name: Proposition
  target_variable: murder
  arguments: none
2:
  operation_kind: call
  function_name: negate
  target_variable: murder
  arguments: none
  return_variable: not_murder
3:
  operation_kind: construct
  function_name: Proposition
  target_variable: unlawful_search
  arguments: none
4:
  operation_kind: construct
  function_name: Argument
  target_variable: p1
  arguments:
    conclusion: murder
    exceptions: [unlawful_search]
    side: prosecution
5:
  operation_kind: construct
  function_name: Argument
  target_variable: d1
  arguments:
    conclusion: not_murder
    side: defense
6:
  operation_kind: construct
  function_name: ArgumentSet
  target_variable: court
  arguments: none
7:
  operation_kind: call
  function_name: add_argument
  target_variable: court
  arguments:
    argument: p1
8:
  operation_kind: call
  function_name: add_argument
  target_variable: court
  arguments:
    argument: d1
9:
  operation_kind: construct
  function_name: Audience
  target_variable: jury
  arguments:
    assumptions: [unlawful_search]
    weights:
      p1: 0.9
      d1: 0.2
10:
  operation_kind: construct
  function_name: ProofStandard
  target_variable: standards
  arguments:
    standards:
      murder: preponderance
      not_murder: preponderance
11:
  operation_kind: construct
  function_name: Evaluator
  target_variable: court_eval
  arguments:
    argument_set: court
    audience: jury
    proof_standard: standards
12:
  operation_kind: call
  function_name: acceptable
  target_variable: court_eval
  arguments:
    proposition: murder
  return_variable: murder_accepted
13:
  operation_kind: call
  function_name: acceptable
  target_variable: court_eval
  arguments:
    proposition: not_murder
";

/// A trial the prosecution can still win, but only by chaining two
/// reserve arguments: the strong motive argument rests on a premise
/// that its companion argument must first establish.
const MOTIVE_CASE: &str = "
1:
  operation_kind: construct
  function_name: Proposition
  target_variable: murder
  arguments: none
2:
  operation_kind: call
  function_name: negate
  target_variable: murder
  arguments: none
  return_variable: not_murder
3:
  operation_kind: construct
  function_name: Proposition
  target_variable: motive_shown
  arguments: none
4:
  operation_kind: construct
  function_name: Argument
  target_variable: p_direct
  arguments:
    conclusion: murder
    side: prosecution
5:
  operation_kind: construct
  function_name: Argument
  target_variable: p_motive
  arguments:
    conclusion: murder
    premises: [motive_shown]
    side: prosecution
6:
  operation_kind: construct
  function_name: Argument
  target_variable: p_motive_support
  arguments:
    conclusion: motive_shown
    side: prosecution
7:
  operation_kind: construct
  function_name: Argument
  target_variable: d_alibi
  arguments:
    conclusion: not_murder
    side: defense
8:
  operation_kind: construct
  function_name: Argument
  target_variable: d_witness
  arguments:
    conclusion: not_murder
    side: defense
9:
  operation_kind: construct
  function_name: Audience
  target_variable: jury
  arguments:
    assumptions: []
    weights:
      p_direct: 0.5
      p_motive: 0.8
      p_motive_support: 0.4
      d_alibi: 0.6
      d_witness: 0.7
10:
  operation_kind: construct
  function_name: ProofStandard
  target_variable: standards
  arguments:
    standards:
      murder: preponderance
      not_murder: preponderance
";

/// Test that interpretation answers queries and the dialogue hands the
/// defense a win by default.
///
/// The assumed exception defeats the prosecution's opener, so its
/// target is never acceptable, and its empty reserve exhausts the
/// first prosecution turn.
#[test]
fn test_defense_wins_when_the_prosecution_is_spent() {
    let harness = TestHarness::from_source(SEARCH_CASE);

    // the defeated opener cannot carry its conclusion
    assert_eq!(harness.bool_result("murder_accepted"), Some(false));
    // the discarded query printed instead of binding
    assert_eq!(harness.outputs(), ["true"]);

    let verdict = harness.verdict();
    assert_eq!(verdict.winner, Side::Defense);
    assert_eq!(verdict.defaulted, Side::Prosecution);
    assert!(verdict.turns.is_empty());
}

/// Test that a turn can commit a chained pair of arguments.
///
/// The motive argument alone leaves its premise unsupported; the
/// search must grow the prefix with the supporting argument before the
/// prosecution's target becomes acceptable.
#[test]
fn test_prosecution_wins_through_a_chained_turn() {
    let harness = TestHarness::from_source(MOTIVE_CASE);
    let verdict = harness.verdict();

    assert_eq!(verdict.winner, Side::Prosecution);
    assert_eq!(verdict.defaulted, Side::Defense);
    assert_eq!(
        verdict.turns,
        vec![TurnRecord {
            turn: 1,
            side: Side::Prosecution,
            added: vec![
                ArgumentId::from("p_motive"),
                ArgumentId::from("p_motive_support"),
            ],
        }]
    );
}

/// Test that the search depth bounds what a turn may combine.
///
/// At depth 1 the prosecution can never pair the motive argument with
/// its support, so the same case flips to a defense win.
#[test]
fn test_search_depth_changes_the_outcome() {
    let harness = TestHarness::from_source(MOTIVE_CASE);
    let verdict = harness.verdict_with_depth(1);

    assert_eq!(verdict.winner, Side::Defense);
    assert_eq!(verdict.defaulted, Side::Prosecution);
    assert!(verdict.turns.is_empty());
}

/// Test that identical documents produce identical outcomes.
#[test]
fn test_execution_is_deterministic() {
    let first = TestHarness::from_source(MOTIVE_CASE);
    let second = TestHarness::from_source(MOTIVE_CASE);

    assert_eq!(first.outputs(), second.outputs());
    assert_eq!(first.verdict(), second.verdict());
    assert_eq!(first.verdict(), first.verdict());
}

/// Test that sequence numbers, not document order, drive execution.
#[test]
fn test_sequence_numbers_drive_execution() {
    let harness = TestHarness::from_source(
        "
3:
  operation_kind: call
  function_name: negate
  target_variable: claim
  arguments: none
  return_variable: counter_claim
1:
  operation_kind: construct
  function_name: Proposition
  target_variable: claim
  arguments: none
",
    );
    // textual order would resolve `claim` before it exists
    assert!(harness.model().symbols().contains("counter_claim"));
}

/// Test that loading a new document replaces the prior case entirely.
#[test]
fn test_reload_replaces_the_prior_case() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first = dir.path().join("first.yaml");
    let second = dir.path().join("second.yaml");
    std::fs::write(
        &first,
        "
1:
  operation_kind: construct
  function_name: Proposition
  target_variable: alpha_claim
  arguments: none
",
    )
    .expect("write first case");
    std::fs::write(
        &second,
        "
1:
  operation_kind: construct
  function_name: Proposition
  target_variable: beta_claim
  arguments: none
2:
  operation_kind: call
  function_name: negate
  target_variable: beta_claim
  arguments: none
  return_variable: beta_counter
",
    )
    .expect("write second case");

    let mut loader = CaseLoader::new();
    let case = loader.load(&first).expect("load first case");
    assert_eq!(case.len(), 1);

    let case = loader.load(&second).expect("load second case");
    assert_eq!(case.len(), 2);
    assert_eq!(loader.path(), Some(second.as_path()));

    let case = loader.case().expect("loaded case");
    let model = Interpreter::new().run(case).expect("interpret second case");
    assert!(model.symbols().contains("beta_claim"));
    assert!(!model.symbols().contains("alpha_claim"));
}

/// Test that schema violations surface the offending sequence number.
#[test]
fn test_invalid_commands_surface_their_sequence() {
    let case = parse_str(
        "
9:
  operation_kind: construct
  function_name: Proposition
  target_variable: claim
  arguments:
    tone: loud
",
    )
    .expect("document parses");
    let err = Interpreter::new().run(&case).unwrap_err();
    match err {
        InterpretError::Validate {
            sequence: 9,
            source: ValidateError::UnknownArgument { function, argument },
        } => {
            assert_eq!(function, "Proposition");
            assert_eq!(argument, "tone");
        }
        other => panic!("unexpected error: {other}"),
    }
}
