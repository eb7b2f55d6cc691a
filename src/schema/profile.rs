use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// The four player attributes supplied by the roster store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Social,
    Logic,
    Focus,
    Perception,
}

/// Attribute values of the active character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    pub social: i32,
    pub logic: i32,
    pub focus: i32,
    pub perception: i32,
}

impl PlayerStats {
    pub fn new(social: i32, logic: i32, focus: i32, perception: i32) -> Self {
        Self {
            social,
            logic,
            focus,
            perception,
        }
    }

    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Social => self.social,
            Stat::Logic => self.logic,
            Stat::Focus => self.focus,
            Stat::Perception => self.perception,
        }
    }
}

/// A predicate over the player's traits and stats that gates a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Requirement {
    HasTrait(String),
    LacksTrait(String),
    StatAtLeast { stat: Stat, value: i32 },
}

impl Requirement {
    pub fn is_met(&self, traits: &FxHashSet<String>, stats: &PlayerStats) -> bool {
        match self {
            Self::HasTrait(name) => traits.contains(name),
            Self::LacksTrait(name) => !traits.contains(name),
            Self::StatAtLeast { stat, value } => stats.get(*stat) >= *value,
        }
    }
}
