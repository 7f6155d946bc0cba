//! Specifications loaded from JSON fixtures through the serde data model.
//!
//! Fixtures live in `tests/data/`. Each one pairs a DFA specification with
//! inputs and the verdict expected for them.

use std::path::PathBuf;

use dfa_core::DfaSpec;
use dfa_engine::{Dfa, FailReason, ValidationError, Verdict};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Helper: fixture loading
// ---------------------------------------------------------------------------

fn load_fixture(filename: &str) -> Value {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(filename);
    let contents = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&contents)
        .unwrap_or_else(|e| panic!("failed to parse fixture {}: {}", path.display(), e))
}

fn parse_verdict(text: &str) -> Verdict {
    match text {
        "accepted" => Verdict::Accepted,
        "rejected" => Verdict::Rejected,
        "unknown_symbol" => Verdict::Failed(FailReason::UnknownSymbol),
        "malformed_input" => Verdict::Failed(FailReason::MalformedInput),
        other => panic!("unknown verdict {other:?} in fixture"),
    }
}

/// Builds the fixture's DFA and checks every listed case. Cases give their
/// input either as `text` (UTF-8 bytes) or `bytes` (array of numbers).
fn check_cases(fixture: &Value) {
    let spec: DfaSpec = serde_json::from_value(fixture["spec"].clone()).expect("spec");
    let dfa = Dfa::build(&spec).expect("fixture spec should validate");

    let cases = fixture["cases"].as_array().expect("cases array");
    assert!(!cases.is_empty());
    for case in cases {
        let input: Vec<u8> = if let Some(text) = case["text"].as_str() {
            text.as_bytes().to_vec()
        } else {
            case["bytes"]
                .as_array()
                .expect("bytes array")
                .iter()
                .map(|b| b.as_u64().expect("byte") as u8)
                .collect()
        };
        let expected = parse_verdict(case["expect"].as_str().expect("expect"));
        assert_eq!(dfa.evaluate(&input), expected, "case {case}");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn binary_fixture() {
    check_cases(&load_fixture("binary.json"));
}

#[test]
fn identifier_fixture() {
    let fixture = load_fixture("identifier.json");
    check_cases(&fixture);

    let spec: DfaSpec = serde_json::from_value(fixture["spec"].clone()).unwrap();
    let dfa = Dfa::build(&spec).unwrap();
    assert_eq!(dfa.name_of(0), Some("start"));
    assert_eq!(dfa.name_of(1), Some("ident"));
}

#[test]
fn token_fixture() {
    check_cases(&load_fixture("tokens.json"));
}

#[test]
fn invalid_fixture_is_refused() {
    let fixture = load_fixture("invalid.json");
    let spec: DfaSpec = serde_json::from_value(fixture["spec"].clone()).unwrap();
    assert_eq!(
        Dfa::build(&spec).unwrap_err(),
        ValidationError::DuplicateEdgeLetter { from: 0, letter: 1 }
    );
}
