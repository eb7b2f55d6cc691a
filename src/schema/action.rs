use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed vocabulary of player tactics usable in an encounter.
///
/// Authored content refers to actions by their snake_case name
/// (`show_proof`, `de_escalate`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialAction {
    Negotiate,
    Argue,
    ShowProof,
    DeEscalate,
    CallSupport,
    Apologize,
    Document,
    Empathize,
    FirmBoundary,
    Humor,
    Wait,
}

impl SocialAction {
    /// Every action, in canonical order.
    pub const ALL: [SocialAction; 11] = [
        Self::Negotiate,
        Self::Argue,
        Self::ShowProof,
        Self::DeEscalate,
        Self::CallSupport,
        Self::Apologize,
        Self::Document,
        Self::Empathize,
        Self::FirmBoundary,
        Self::Humor,
        Self::Wait,
    ];

    /// The snake_case name used in content files and across the UI boundary.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Negotiate => "negotiate",
            Self::Argue => "argue",
            Self::ShowProof => "show_proof",
            Self::DeEscalate => "de_escalate",
            Self::CallSupport => "call_support",
            Self::Apologize => "apologize",
            Self::Document => "document",
            Self::Empathize => "empathize",
            Self::FirmBoundary => "firm_boundary",
            Self::Humor => "humor",
            Self::Wait => "wait",
        }
    }
}

impl fmt::Display for SocialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string does not name a [`SocialAction`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown social action: '{0}'")]
pub struct UnknownAction(pub String);

impl FromStr for SocialAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|action| action.name() == wanted)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// The opponent's disposition while in a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Mood {
    Friendly,
    #[default]
    Neutral,
    Guarded,
    Irritated,
    Hostile,
}

impl Mood {
    /// Returns the tag string for this mood (e.g., "mood:hostile").
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Friendly => "mood:friendly",
            Self::Neutral => "mood:neutral",
            Self::Guarded => "mood:guarded",
            Self::Irritated => "mood:irritated",
            Self::Hostile => "mood:hostile",
        }
    }
}
