//! Behavioral properties of built DFAs: alphabet injectivity, determinism,
//! default-policy short-circuiting, termination-mode complements and
//! concurrent evaluation.

use dfa_core::{AlphabetSpec, DefaultPolicy, DfaSpecBuilder, StateId};
use dfa_engine::alphabet::Alphabet;
use dfa_engine::{Dfa, EvalOptions, FailReason, StopCause, Verdict};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Counts 1s modulo 3 over a binary alphabet; state 2 loops on letter 0
/// via its default and everything else uses explicit edges.
fn mod3_builder() -> DfaSpecBuilder {
    DfaSpecBuilder::new(AlphabetSpec::Bounded { min: 0, max: 1 })
        .states(3)
        .start(0)
        .transition(0, DefaultPolicy::Reject, [(0, 0), (1, 1)])
        .transition(1, DefaultPolicy::Reject, [(0, 1), (1, 2)])
        .transition(2, DefaultPolicy::Goto(2), [(1, 0)])
}

/// Every binary word of length `0..=max_len`.
fn binary_words(max_len: u32) -> Vec<Vec<u64>> {
    let mut words = Vec::new();
    for len in 0..=max_len {
        for bits in 0..(1u64 << len) {
            words.push((0..len).map(|i| (bits >> i) & 1).collect());
        }
    }
    words
}

fn ones_mod3(word: &[u64]) -> u64 {
    word.iter().sum::<u64>() % 3
}

// ---------------------------------------------------------------------------
// Alphabet
// ---------------------------------------------------------------------------

#[test]
fn bounded_resolution_is_injective_on_range() {
    let alphabet = Alphabet::new(&AlphabetSpec::Bounded { min: 100, max: 355 }).unwrap();
    let mut seen = std::collections::HashSet::new();
    for value in 0..600u64 {
        match alphabet.resolve_value(value) {
            Ok(letter) => {
                assert!((100..=355).contains(&value));
                assert!(seen.insert(letter), "letter {letter} resolved twice");
            }
            Err(_) => assert!(!(100..=355).contains(&value)),
        }
    }
    assert_eq!(seen.len(), 256);
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

#[test]
fn mod3_counts_ones() {
    let dfa = Dfa::build(&mod3_builder().accept_states([0]).build()).unwrap();
    for word in binary_words(7) {
        let expected = if ones_mod3(&word) == 0 {
            Verdict::Accepted
        } else {
            Verdict::Rejected
        };
        assert_eq!(dfa.evaluate_values(word.iter().copied()), expected, "{word:?}");
    }
}

#[test]
fn evaluation_is_repeatable() {
    let dfa = Dfa::build(&mod3_builder().accept_states([1]).build()).unwrap();
    for word in binary_words(5) {
        let first = dfa.run_values(word.iter().copied(), &EvalOptions::default());
        let second = dfa.run_values(word.iter().copied(), &EvalOptions::default());
        assert_eq!(first, second);
    }
}

#[test]
fn accept_and_reject_lists_are_complements() {
    let all_states: Vec<StateId> = (0..3).collect();
    for s in 0..3 {
        let accept = Dfa::build(&mod3_builder().accept_states([s]).build()).unwrap();
        let reject = Dfa::build(
            &mod3_builder()
                .reject_states(all_states.iter().copied().filter(|&t| t != s))
                .build(),
        )
        .unwrap();
        for word in binary_words(6) {
            assert_eq!(
                accept.evaluate_values(word.iter().copied()),
                reject.evaluate_values(word.iter().copied()),
                "state {s}, word {word:?}"
            );
        }
    }
}

#[test]
fn default_accept_short_circuits_long_input() {
    let spec = DfaSpecBuilder::new(AlphabetSpec::UInt8)
        .states(1)
        .accept_states([])
        .transition(0, DefaultPolicy::Accept, [])
        .build();
    let dfa = Dfa::build(&spec).unwrap();

    assert_eq!(dfa.evaluate(&[]), Verdict::Accepted);
    assert_eq!(dfa.evaluate_values([]), Verdict::Accepted);
    assert_eq!(dfa.evaluate_values([0]), Verdict::Accepted);

    let long = vec![0xAB; 10_000];
    let report = dfa.run(&long, &EvalOptions::default());
    assert_eq!(report.verdict, Verdict::Accepted);
    assert_eq!(report.cause, StopCause::DefaultAccept);
    assert_eq!(report.consumed, 1);
}

#[test]
fn default_accept_with_accepting_start_accepts_empty_input() {
    let spec = DfaSpecBuilder::new(AlphabetSpec::UInt8)
        .states(1)
        .accept_states([0])
        .transition(0, DefaultPolicy::Accept, [])
        .build();
    let dfa = Dfa::build(&spec).unwrap();
    assert_eq!(dfa.evaluate(&[]), Verdict::Accepted);
    assert_eq!(dfa.evaluate(&[1, 2, 3]), Verdict::Accepted);
}

#[test]
fn failure_is_not_rejection() {
    let spec = DfaSpecBuilder::new(AlphabetSpec::Ascii)
        .states(1)
        .accept_states([])
        .transition(0, DefaultPolicy::Goto(0), [])
        .build();
    let dfa = Dfa::build(&spec).unwrap();
    assert_eq!(dfa.evaluate(b"plain"), Verdict::Rejected);
    assert_eq!(
        dfa.evaluate(&[b'p', 0xC3, 0xA9]),
        Verdict::Failed(FailReason::MalformedInput)
    );
    assert_eq!(
        dfa.evaluate_values([u64::from(b'p'), 300]),
        Verdict::Failed(FailReason::UnknownSymbol)
    );
}

// ---------------------------------------------------------------------------
// Sharing
// ---------------------------------------------------------------------------

#[test]
fn dfa_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Dfa>();
}

#[test]
fn concurrent_evaluations_agree() {
    let dfa = Dfa::build(&mod3_builder().accept_states([0]).build()).unwrap();
    let words = binary_words(6);
    let expected: Vec<Verdict> = words
        .iter()
        .map(|w| dfa.evaluate_values(w.iter().copied()))
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    words
                        .iter()
                        .map(|w| dfa.evaluate_values(w.iter().copied()))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
