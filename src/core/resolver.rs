/// Action resolution: legality, skill checks, and the resulting effects.
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::context::EncounterContext;
use crate::core::transition;
use crate::schema::action::SocialAction;
use crate::schema::encounter::{Encounter, EncounterState, NpcAction, SkillCheck, StateId, TransitionEffects};
use crate::schema::outcome::Outcome;

/// Why an action was refused. Refusals never mutate the encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// The encounter already has an outcome.
    EncounterComplete,
    /// `start()` has not been called yet.
    NotStarted,
    /// The action is not offered in the current state.
    ActionUnavailable,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EncounterComplete => "encounter is already complete",
            Self::NotStarted => "encounter has not started",
            Self::ActionUnavailable => "action not available in current state",
        })
    }
}

/// The dice behind a skill check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRoll {
    pub roll: i32,
    pub bonus: i32,
    pub target: i32,
    pub success: bool,
}

impl CheckRoll {
    pub fn total(&self) -> i32 {
        self.roll.saturating_add(self.bonus)
    }
}

/// Feedback for one `perform_action` call, consumed by the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    pub message: Option<String>,
    pub rejection: Option<Rejection>,
    /// Index of the applied transition; `None` when nothing matched.
    pub transition: Option<usize>,
    pub dialogue_override: Option<String>,
    pub check: Option<CheckRoll>,
    pub npc_reaction: Option<NpcAction>,
    /// Set on the action that completed the encounter.
    pub outcome: Option<Outcome>,
}

impl ActionResult {
    pub fn rejected(rejection: Rejection) -> Self {
        Self {
            success: false,
            message: Some(rejection.to_string()),
            rejection: Some(rejection),
            ..Self::default()
        }
    }
}

/// Everything one accepted action changes, computed before anything is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub transition: Option<usize>,
    pub next_state: StateId,
    pub reputation_change: i32,
    pub stress_change: i32,
    pub dialogue_override: Option<String>,
    pub check: Option<CheckRoll>,
}

/// Refuse actions the current state does not offer.
pub fn ensure_available(
    encounter: &Encounter,
    ctx: &EncounterContext,
    action: SocialAction,
) -> Result<(), Rejection> {
    match encounter.state(&ctx.current_state) {
        Some(state) if state.allows(action) => Ok(()),
        _ => Err(Rejection::ActionUnavailable),
    }
}

/// Work out what `action` does from the current context.
///
/// Rolls the skill check, if the selected transition has one, with `rng`.
/// When no transition matches the result is a no-op that keeps the state.
pub fn resolve(
    encounter: &Encounter,
    action: SocialAction,
    ctx: &EncounterContext,
    rng: &mut StdRng,
) -> Resolution {
    let Some((index, selected)) = transition::select(encounter, action, ctx) else {
        tracing::warn!(
            encounter = %encounter.id,
            state = %ctx.current_state,
            action = %action,
            "no transition matches; round passes without effect"
        );
        return Resolution {
            transition: None,
            next_state: ctx.current_state.clone(),
            reputation_change: 0,
            stress_change: 0,
            dialogue_override: None,
            check: None,
        };
    };

    let (next_state, effects, check) = match selected.check {
        Some(ref check) => {
            let roll = roll_check(check, ctx, rng);
            tracing::debug!(
                encounter = %encounter.id,
                roll = roll.roll,
                bonus = roll.bonus,
                target = roll.target,
                success = roll.success,
                "skill check"
            );
            if roll.success {
                (selected.to.clone(), selected.effects.as_ref(), Some(roll))
            } else {
                let target = check.failure_to.clone().unwrap_or_else(|| selected.from.clone());
                (target, check.failure_effects.as_ref(), Some(roll))
            }
        }
        None => (selected.to.clone(), selected.effects.as_ref(), None),
    };

    let (reputation_change, stress_change, dialogue_override) = split_effects(effects);
    Resolution {
        transition: Some(index),
        next_state,
        reputation_change,
        stress_change,
        dialogue_override,
        check,
    }
}

/// Pick the opponent's reaction in `state`, uniformly, if it has any.
pub fn npc_reaction<'a>(state: &'a EncounterState, rng: &mut StdRng) -> Option<&'a NpcAction> {
    if state.npc_actions.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..state.npc_actions.len());
    state.npc_actions.get(index)
}

fn roll_check(check: &SkillCheck, ctx: &EncounterContext, rng: &mut StdRng) -> CheckRoll {
    let roll: i32 = rng.gen_range(1..=20);
    let bonus = ctx.player_stats.get(check.stat);
    CheckRoll {
        roll,
        bonus,
        target: check.target,
        success: roll.saturating_add(bonus) >= check.target,
    }
}

fn split_effects(effects: Option<&TransitionEffects>) -> (i32, i32, Option<String>) {
    match effects {
        Some(e) => (
            e.reputation_change.unwrap_or(0),
            e.stress_change.unwrap_or(0),
            e.dialogue_override.clone(),
        ),
        None => (0, 0, None),
    }
}
