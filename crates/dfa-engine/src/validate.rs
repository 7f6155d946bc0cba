// Build-phase validation.
// Origin: dfa_t.h
//
// Every invariant of a DfaSpec is checked here before any engine component
// is constructed. Checks run in a fixed order and the first violation is
// returned.

use dfa_core::{AlphabetSpec, DefaultPolicy, DfaSpec, Letter, StateId, StateSpec};
use hashbrown::{HashMap, HashSet};

use crate::ValidationError;

/// Checks every invariant of `spec`.
pub fn validate(spec: &DfaSpec) -> Result<(), ValidationError> {
    check_alphabet(&spec.alphabet)?;
    let num_letters = check_letter_count(spec)?;
    check_states(spec)?;
    check_termination(spec)?;
    check_transitions(spec, num_letters)?;
    Ok(())
}

/// Checks the alphabet data on its own.
pub fn check_alphabet(alphabet: &AlphabetSpec) -> Result<(), ValidationError> {
    match alphabet {
        AlphabetSpec::Bounded { min, max } => {
            if min > max {
                return Err(ValidationError::InvalidBounds {
                    min: *min,
                    max: *max,
                });
            }
        }
        AlphabetSpec::FixedCustom {
            letter_width,
            letters,
        } => {
            if *letter_width == 0 {
                return Err(ValidationError::ZeroLetterWidth);
            }
            for (i, bytes) in letters.iter().enumerate() {
                if bytes.len() != *letter_width {
                    return Err(ValidationError::LetterWidthMismatch {
                        letter: i as Letter,
                        expected: *letter_width,
                        actual: bytes.len(),
                    });
                }
            }
            check_distinct(letters.iter().map(Vec::as_slice))?;
        }
        AlphabetSpec::VariableCustom { letters } => {
            for (i, letter) in letters.iter().enumerate() {
                if letter.width != letter.bytes.len() {
                    return Err(ValidationError::LetterWidthMismatch {
                        letter: i as Letter,
                        expected: letter.width,
                        actual: letter.bytes.len(),
                    });
                }
                if letter.bytes.is_empty() {
                    return Err(ValidationError::EmptyLetter { letter: i as Letter });
                }
            }
            check_distinct(letters.iter().map(|l| l.bytes.as_slice()))?;
        }
        AlphabetSpec::Ascii
        | AlphabetSpec::Utf8
        | AlphabetSpec::Utf16
        | AlphabetSpec::Utf32
        | AlphabetSpec::UInt8
        | AlphabetSpec::UInt16
        | AlphabetSpec::UInt32
        | AlphabetSpec::UInt64 => {}
    }
    Ok(())
}

fn check_distinct<'a>(letters: impl Iterator<Item = &'a [u8]>) -> Result<(), ValidationError> {
    let mut seen: HashMap<&[u8], Letter> = HashMap::new();
    for (i, bytes) in letters.enumerate() {
        if let Some(&first) = seen.get(bytes) {
            return Err(ValidationError::DuplicateLetter {
                letter: i as Letter,
                first,
            });
        }
        seen.insert(bytes, i as Letter);
    }
    Ok(())
}

/// Returns the letter count, checking it against a declared count if any.
fn check_letter_count(spec: &DfaSpec) -> Result<u128, ValidationError> {
    let derived = spec.alphabet.letter_count();
    match spec.num_letters {
        Some(declared) if declared != derived => {
            Err(ValidationError::LetterCountMismatch { declared, derived })
        }
        _ => Ok(derived),
    }
}

fn check_states(spec: &DfaSpec) -> Result<(), ValidationError> {
    if spec.num_states == 0 {
        return Err(ValidationError::NoStates);
    }
    if let StateSpec::Named { names } = &spec.states {
        if names.len() as u128 != u128::from(spec.num_states) {
            return Err(ValidationError::NameCountMismatch {
                states: spec.num_states,
                names: names.len(),
            });
        }
    }
    if spec.start_state >= spec.num_states {
        return Err(ValidationError::StartStateOutOfRange {
            state: spec.start_state,
            num_states: spec.num_states,
        });
    }
    Ok(())
}

fn check_termination(spec: &DfaSpec) -> Result<(), ValidationError> {
    let num_states = spec.num_states;
    match spec.termination.states().iter().find(|&&s| s >= num_states) {
        Some(&state) => Err(ValidationError::TerminationStateOutOfRange { state, num_states }),
        None => Ok(()),
    }
}

fn check_transitions(spec: &DfaSpec, num_letters: u128) -> Result<(), ValidationError> {
    let num_states = spec.num_states;
    let target_in_range = |from: StateId, target: StateId| {
        if target < num_states {
            Ok(())
        } else {
            Err(ValidationError::TargetStateOutOfRange {
                from,
                target,
                num_states,
            })
        }
    };

    let mut declared: HashSet<StateId> = HashSet::with_capacity(spec.transitions.len());
    for function in &spec.transitions {
        let from = function.from;
        if from >= num_states {
            return Err(ValidationError::TransitionSourceOutOfRange {
                state: from,
                num_states,
            });
        }
        if !declared.insert(from) {
            return Err(ValidationError::DuplicateTransitionFunction { state: from });
        }
        if let DefaultPolicy::Goto(target) = function.default {
            target_in_range(from, target)?;
        }

        let mut letters: HashSet<Letter> = HashSet::with_capacity(function.edges.len());
        for edge in &function.edges {
            if !spec.alphabet.contains_letter(edge.letter) {
                return Err(ValidationError::LetterOutOfRange {
                    from,
                    letter: edge.letter,
                    num_letters,
                });
            }
            if !letters.insert(edge.letter) {
                return Err(ValidationError::DuplicateEdgeLetter {
                    from,
                    letter: edge.letter,
                });
            }
            target_in_range(from, edge.target)?;
        }
    }
    Ok(())
}
