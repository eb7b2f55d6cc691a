/// Encounter context: the mutable resource and history ledger of one encounter.
use chrono::{DateTime, Utc};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::schema::action::SocialAction;
use crate::schema::encounter::{Encounter, StateId};
use crate::schema::profile::PlayerStats;

pub const REPUTATION_MIN: i32 = 0;
pub const REPUTATION_MAX: i32 = 100;

/// One entry of the append-only encounter log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub state: StateId,
    pub action: Option<SocialAction>,
    pub timestamp: DateTime<Utc>,
}

/// Mutable state of an active encounter. Callers only ever see it by
/// shared reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterContext {
    pub current_state: StateId,
    pub reputation: i32,
    pub stress: i32,
    pub max_stress: i32,
    pub rounds_passed: u32,
    pub history: Vec<HistoryEntry>,
    pub player_traits: FxHashSet<String>,
    pub player_stats: PlayerStats,
}

impl EncounterContext {
    pub fn new(encounter: &Encounter, player_traits: FxHashSet<String>, player_stats: PlayerStats) -> Self {
        let initial = encounter.initial_values;
        Self {
            current_state: encounter.initial_state.clone(),
            reputation: initial.reputation,
            stress: initial.stress,
            max_stress: initial.max_stress,
            rounds_passed: 0,
            history: Vec::new(),
            player_traits,
            player_stats,
        }
    }

    /// Apply resource deltas, clamping reputation to `[0, 100]` and
    /// stress to `[0, max_stress]`.
    pub fn apply_deltas(&mut self, reputation_change: i32, stress_change: i32) {
        self.reputation = self
            .reputation
            .saturating_add(reputation_change)
            .clamp(REPUTATION_MIN, REPUTATION_MAX);
        self.stress = self
            .stress
            .saturating_add(stress_change)
            .clamp(0, self.max_stress);
    }

    pub(crate) fn record(&mut self, action: Option<SocialAction>, timestamp: DateTime<Utc>) {
        self.history.push(HistoryEntry {
            state: self.current_state.clone(),
            action,
            timestamp,
        });
    }
}
