use serde::{Deserialize, Serialize};

/// How a completed encounter ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Victory,
    Defeat,
}

/// Payload forwarded to the economy/progress store on victory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rewards {
    pub tips: Option<u32>,
    pub experience: Option<u32>,
    pub reputation: Option<i32>,
    pub items: Vec<String>,
    pub unlocks_dialogue: Option<String>,
}

/// Payload forwarded to the economy/progress store on defeat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Consequences {
    pub tips: Option<i32>,
    pub reputation: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WinOutcome {
    /// Story state to continue with; belongs to the surrounding story, not this encounter.
    pub next_state: Option<String>,
    pub dialogue: String,
    pub rewards: Rewards,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoseOutcome {
    pub next_state: Option<String>,
    pub dialogue: String,
    pub consequences: Consequences,
}

/// The reward or consequence payload of a finished encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "payload", rename_all = "lowercase")]
pub enum Payout<'a> {
    Victory(&'a Rewards),
    Defeat(&'a Consequences),
}

impl Payout<'_> {
    pub fn outcome(&self) -> Outcome {
        match self {
            Self::Victory(_) => Outcome::Victory,
            Self::Defeat(_) => Outcome::Defeat,
        }
    }

    /// Net reputation change granted to the player's global standing.
    pub fn reputation(&self) -> Option<i32> {
        match self {
            Self::Victory(r) => r.reputation,
            Self::Defeat(c) => c.reputation,
        }
    }
}
