use serde::{Deserialize, Serialize};
use std::fmt;

use super::encounter::StateId;

/// Comparison operator applied as `context_field <op> value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    Gt,
    #[default]
    Gte,
    Lt,
    Lte,
    Eq,
}

impl Comparison {
    pub fn compare(&self, actual: i64, expected: i64) -> bool {
        match self {
            Self::Gt => actual > expected,
            Self::Gte => actual >= expected,
            Self::Lt => actual < expected,
            Self::Lte => actual <= expected,
            Self::Eq => actual == expected,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Eq => "==",
        }
    }
}

/// A single win/lose check. Each condition tests exactly one thing;
/// a list of conditions is satisfied when any one of them holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    Reputation {
        value: i32,
        #[serde(default)]
        comparison: Comparison,
    },
    Stress {
        value: i32,
        #[serde(default)]
        comparison: Comparison,
    },
    Rounds {
        value: i32,
        #[serde(default)]
        comparison: Comparison,
    },
    /// True while the encounter sits in `state`.
    State { state: StateId },
}

impl Condition {
    pub fn reputation(value: i32, comparison: Comparison) -> Self {
        Self::Reputation { value, comparison }
    }

    pub fn stress(value: i32, comparison: Comparison) -> Self {
        Self::Stress { value, comparison }
    }

    pub fn rounds(value: i32, comparison: Comparison) -> Self {
        Self::Rounds { value, comparison }
    }

    pub fn state(state: impl Into<StateId>) -> Self {
        Self::State {
            state: state.into(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reputation { value, comparison } => {
                write!(f, "reputation {} {}", comparison.symbol(), value)
            }
            Self::Stress { value, comparison } => {
                write!(f, "stress {} {}", comparison.symbol(), value)
            }
            Self::Rounds { value, comparison } => {
                write!(f, "rounds {} {}", comparison.symbol(), value)
            }
            Self::State { state } => write!(f, "state is '{}'", state),
        }
    }
}

/// A numeric bound used by transition guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Threshold {
    pub value: i32,
    #[serde(default)]
    pub comparison: Comparison,
}

impl Threshold {
    pub fn new(value: i32, comparison: Comparison) -> Self {
        Self { value, comparison }
    }

    pub fn at_least(value: i32) -> Self {
        Self::new(value, Comparison::Gte)
    }
}

/// Guard on a transition. Every present field must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionCondition {
    pub reputation: Option<Threshold>,
    pub stress: Option<Threshold>,
    pub rounds_passed: Option<Threshold>,
}

impl TransitionCondition {
    /// Expands the guard into the equivalent list of independent conditions.
    pub fn as_conditions(&self) -> Vec<Condition> {
        let mut out = Vec::with_capacity(3);
        if let Some(t) = self.reputation {
            out.push(Condition::reputation(t.value, t.comparison));
        }
        if let Some(t) = self.stress {
            out.push(Condition::stress(t.value, t.comparison));
        }
        if let Some(t) = self.rounds_passed {
            out.push(Condition::rounds(t.value, t.comparison));
        }
        out
    }
}
