use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::action::{Mood, SocialAction};
use super::condition::{Condition, TransitionCondition};
use super::outcome::{LoseOutcome, WinOutcome};
use super::profile::{Requirement, Stat};

/// Newtype wrapper for state ids within one encounter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(pub String);

impl StateId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for StateId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Starting resource values. Omitted fields take the defaults
/// reputation 50, stress 0, max_stress 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialValues {
    pub reputation: i32,
    pub stress: i32,
    pub max_stress: i32,
}

impl Default for InitialValues {
    fn default() -> Self {
        Self {
            reputation: 50,
            stress: 0,
            max_stress: 100,
        }
    }
}

/// What an NPC reaction does to the encounter's resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NpcEffect {
    /// Text only.
    Flavor,
    /// Raises stress by `magnitude`.
    Pressure,
    /// Lowers stress by `magnitude`.
    Calm,
    /// Raises reputation by `magnitude`.
    Warm,
    /// Lowers reputation by `magnitude`.
    Cool,
}

impl NpcEffect {
    /// Resource deltas `(reputation, stress)` for a reaction of this kind.
    pub fn deltas(&self, magnitude: i32) -> (i32, i32) {
        match self {
            Self::Flavor => (0, 0),
            Self::Pressure => (0, magnitude),
            Self::Calm => (0, magnitude.saturating_neg()),
            Self::Warm => (magnitude, 0),
            Self::Cool => (magnitude.saturating_neg(), 0),
        }
    }
}

/// Something the opponent does while the encounter sits in a state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcAction {
    pub text: String,
    pub effect: NpcEffect,
    #[serde(default)]
    pub magnitude: i32,
}

/// One node of the encounter's state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterState {
    pub id: StateId,
    pub name: String,
    pub dialogue: String,
    #[serde(default)]
    pub mood: Mood,
    pub player_actions: BTreeSet<SocialAction>,
    #[serde(default)]
    pub npc_actions: Vec<NpcAction>,
}

impl EncounterState {
    pub fn allows(&self, action: SocialAction) -> bool {
        self.player_actions.contains(&action)
    }
}

/// Resource changes applied when a transition fires.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionEffects {
    pub reputation_change: Option<i32>,
    pub stress_change: Option<i32>,
    pub dialogue_override: Option<String>,
}

/// A d20 roll plus one player stat against a target number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCheck {
    pub stat: Stat,
    pub target: i32,
    /// Where a failed check leads; stays in the transition's `from` state when absent.
    #[serde(default)]
    pub failure_to: Option<StateId>,
    #[serde(default)]
    pub failure_effects: Option<TransitionEffects>,
}

/// A rule mapping (state, action, guard) to a new state plus effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: StateId,
    pub to: StateId,
    /// `None` matches any action.
    #[serde(default)]
    pub action: Option<SocialAction>,
    #[serde(default)]
    pub condition: Option<TransitionCondition>,
    #[serde(default)]
    pub requires: Vec<Requirement>,
    #[serde(default)]
    pub check: Option<SkillCheck>,
    #[serde(default)]
    pub effects: Option<TransitionEffects>,
}

impl Transition {
    pub fn new(from: impl Into<StateId>, to: impl Into<StateId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            action: None,
            condition: None,
            requires: Vec::new(),
            check: None,
            effects: None,
        }
    }

    pub fn on(mut self, action: SocialAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn when(mut self, condition: TransitionCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn requiring(mut self, requirement: Requirement) -> Self {
        self.requires.push(requirement);
        self
    }

    pub fn with_check(mut self, check: SkillCheck) -> Self {
        self.check = Some(check);
        self
    }

    pub fn with_effects(mut self, effects: TransitionEffects) -> Self {
        self.effects = Some(effects);
        self
    }
}

/// A self-contained, content-authored social conflict scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub setting: String,
    #[serde(default)]
    pub opponent_type: String,
    pub difficulty: u8,
    pub initial_state: StateId,
    #[serde(default)]
    pub initial_values: InitialValues,
    pub states: BTreeMap<StateId, EncounterState>,
    #[serde(default)]
    pub transitions: Vec<Transition>,
    #[serde(default)]
    pub win_conditions: Vec<Condition>,
    #[serde(default)]
    pub lose_conditions: Vec<Condition>,
    #[serde(default)]
    pub win_outcome: WinOutcome,
    #[serde(default)]
    pub lose_outcome: LoseOutcome,
    /// Advisory only; the caller owns the clock.
    #[serde(default)]
    pub timer_seconds: Option<u32>,
    #[serde(default)]
    pub special_mechanics: Vec<String>,
}

impl Encounter {
    pub fn state(&self, id: &StateId) -> Option<&EncounterState> {
        self.states.get(id)
    }

    pub fn has_mechanic(&self, tag: &str) -> bool {
        self.special_mechanics.iter().any(|m| m == tag)
    }

    /// Transitions leaving `state`, in declaration order, with their indices.
    pub fn transitions_from<'a, 's>(
        &'a self,
        state: &'s StateId,
    ) -> impl Iterator<Item = (usize, &'a Transition)> + 's
    where
        'a: 's,
    {
        self.transitions
            .iter()
            .enumerate()
            .filter(move |(_, t)| &t.from == state)
    }
}
