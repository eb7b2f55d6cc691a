/// Definition integrity checks (fatal) and content lint (advisory).
use std::collections::{BTreeSet, VecDeque};
use std::fmt;
use thiserror::Error;

use crate::schema::condition::Condition;
use crate::schema::encounter::{Encounter, StateId};

/// A content-authoring defect that makes an encounter unplayable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentIntegrityError {
    #[error("encounter '{encounter}' defines no states")]
    EmptyStates { encounter: String },
    #[error("encounter '{encounter}': initial state '{state}' is not defined")]
    MissingInitialState { encounter: String, state: StateId },
    #[error("encounter '{encounter}': state keyed '{key}' declares id '{id}'")]
    StateIdMismatch {
        encounter: String,
        key: StateId,
        id: StateId,
    },
    #[error("encounter '{encounter}': transition #{index} {field} references unknown state '{state}'")]
    DanglingTransition {
        encounter: String,
        index: usize,
        field: &'static str,
        state: StateId,
    },
    #[error("encounter '{encounter}': {list} condition #{index} references unknown state '{state}'")]
    DanglingConditionState {
        encounter: String,
        list: &'static str,
        index: usize,
        state: StateId,
    },
    #[error("encounter '{encounter}': difficulty {difficulty} is outside 1..=10")]
    DifficultyOutOfRange { encounter: String, difficulty: u8 },
    #[error("encounter '{encounter}': invalid initial values: {reason}")]
    InvalidInitialValues { encounter: String, reason: String },
}

/// Check every cross-reference and range in the definition.
///
/// Runs once when an engine is built; the runtime relies on the result
/// and never re-checks.
pub fn validate(encounter: &Encounter) -> Result<(), ContentIntegrityError> {
    let name = || encounter.id.clone();

    if encounter.states.is_empty() {
        return Err(ContentIntegrityError::EmptyStates { encounter: name() });
    }
    if !encounter.states.contains_key(&encounter.initial_state) {
        return Err(ContentIntegrityError::MissingInitialState {
            encounter: name(),
            state: encounter.initial_state.clone(),
        });
    }
    for (key, state) in &encounter.states {
        if key != &state.id {
            return Err(ContentIntegrityError::StateIdMismatch {
                encounter: name(),
                key: key.clone(),
                id: state.id.clone(),
            });
        }
    }

    for (index, transition) in encounter.transitions.iter().enumerate() {
        let mut refs = vec![("from", &transition.from), ("to", &transition.to)];
        if let Some(target) = transition.check.as_ref().and_then(|c| c.failure_to.as_ref()) {
            refs.push(("check.failure_to", target));
        }
        for (field, state) in refs {
            if !encounter.states.contains_key(state) {
                return Err(ContentIntegrityError::DanglingTransition {
                    encounter: name(),
                    index,
                    field,
                    state: state.clone(),
                });
            }
        }
    }

    for (list, conditions) in [
        ("win", &encounter.win_conditions),
        ("lose", &encounter.lose_conditions),
    ] {
        for (index, condition) in conditions.iter().enumerate() {
            if let Condition::State { state } = condition {
                if !encounter.states.contains_key(state) {
                    return Err(ContentIntegrityError::DanglingConditionState {
                        encounter: name(),
                        list,
                        index,
                        state: state.clone(),
                    });
                }
            }
        }
    }

    if !(1..=10).contains(&encounter.difficulty) {
        return Err(ContentIntegrityError::DifficultyOutOfRange {
            encounter: name(),
            difficulty: encounter.difficulty,
        });
    }

    let initial = encounter.initial_values;
    let reason = if initial.max_stress <= 0 {
        Some(format!("max_stress must be positive, got {}", initial.max_stress))
    } else if !(0..=100).contains(&initial.reputation) {
        Some(format!("reputation {} is outside 0..=100", initial.reputation))
    } else if !(0..=initial.max_stress).contains(&initial.stress) {
        Some(format!(
            "stress {} is outside 0..={}",
            initial.stress, initial.max_stress
        ))
    } else {
        None
    };
    if let Some(reason) = reason {
        return Err(ContentIntegrityError::InvalidInitialValues {
            encounter: name(),
            reason,
        });
    }

    Ok(())
}

/// A suspicious but playable construct in an encounter definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintFinding {
    /// The transition's action is never offered in its `from` state.
    UnreachableTransition { index: usize },
    /// A state with no outgoing transitions.
    DeadEnd { state: StateId },
    /// A state no path from the initial state reaches.
    UnreachableState { state: StateId },
    NoWinConditions,
    NoLoseConditions,
}

impl fmt::Display for LintFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnreachableTransition { index } => write!(
                f,
                "transition #{} uses an action its source state never offers",
                index
            ),
            Self::DeadEnd { state } => write!(f, "state '{}' has no outgoing transitions", state),
            Self::UnreachableState { state } => {
                write!(f, "state '{}' is unreachable from the initial state", state)
            }
            Self::NoWinConditions => f.write_str("no win conditions; victory is impossible"),
            Self::NoLoseConditions => f.write_str("no lose conditions; defeat only by timeout"),
        }
    }
}

/// Advisory checks over a definition that already passed [`validate`].
pub fn lint(encounter: &Encounter) -> Vec<LintFinding> {
    let mut findings = Vec::new();

    for (index, transition) in encounter.transitions.iter().enumerate() {
        if let (Some(action), Some(from)) = (transition.action, encounter.state(&transition.from)) {
            if !from.allows(action) {
                findings.push(LintFinding::UnreachableTransition { index });
            }
        }
    }

    for id in encounter.states.keys() {
        if encounter.transitions_from(id).next().is_none() {
            findings.push(LintFinding::DeadEnd { state: id.clone() });
        }
    }

    let reachable = reachable_states(encounter);
    for id in encounter.states.keys() {
        if !reachable.contains(id) {
            findings.push(LintFinding::UnreachableState { state: id.clone() });
        }
    }

    if encounter.win_conditions.is_empty() {
        findings.push(LintFinding::NoWinConditions);
    }
    if encounter.lose_conditions.is_empty() {
        findings.push(LintFinding::NoLoseConditions);
    }

    for finding in &findings {
        tracing::warn!(encounter = %encounter.id, "{}", finding);
    }
    findings
}

fn reachable_states(encounter: &Encounter) -> BTreeSet<StateId> {
    let mut seen = BTreeSet::new();
    let mut queue = VecDeque::from([encounter.initial_state.clone()]);
    while let Some(id) = queue.pop_front() {
        if !seen.insert(id.clone()) {
            continue;
        }
        for (_, transition) in encounter.transitions_from(&id) {
            queue.push_back(transition.to.clone());
            if let Some(target) = transition.check.as_ref().and_then(|c| c.failure_to.clone()) {
                queue.push_back(target);
            }
        }
    }
    seen
}
