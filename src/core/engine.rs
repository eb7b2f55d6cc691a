/// The encounter engine: owns one encounter's context and drives it
/// action by action.
///
/// ```text
/// builder / new ─► start ─► perform_action* ─► outcome + rewards
///                              │
///                  validate ◄──┘ (once, at build)
/// ```
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashSet;
use std::fmt;

use crate::core::clock::{Clock, SystemClock};
use crate::core::condition::any_satisfied;
use crate::core::context::{EncounterContext, HistoryEntry};
use crate::core::resolver::{self, ActionResult, Rejection};
use crate::core::validate::{validate, ContentIntegrityError};
use crate::schema::action::SocialAction;
use crate::schema::encounter::{Encounter, EncounterState};
use crate::schema::outcome::{Outcome, Payout};
use crate::schema::profile::PlayerStats;

/// Resolves one social encounter. Build one per encounter; nothing is
/// shared between instances.
pub struct EncounterEngine {
    encounter: Encounter,
    context: EncounterContext,
    rng: StdRng,
    clock: Box<dyn Clock>,
    outcome: Option<Outcome>,
    dialogue_override: Option<String>,
}

/// Builder for constructing an `EncounterEngine`.
pub struct EncounterEngineBuilder {
    encounter: Encounter,
    traits: FxHashSet<String>,
    stats: PlayerStats,
    rng: Option<StdRng>,
    clock: Option<Box<dyn Clock>>,
}

impl EncounterEngine {
    /// Validate `encounter` and set up a fresh, not yet started engine
    /// with an entropy-seeded RNG and the system clock.
    pub fn new<I, S>(
        encounter: Encounter,
        player_traits: I,
        player_stats: PlayerStats,
    ) -> Result<Self, ContentIntegrityError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::builder(encounter)
            .traits(player_traits)
            .stats(player_stats)
            .build()
    }

    pub fn builder(encounter: Encounter) -> EncounterEngineBuilder {
        EncounterEngineBuilder {
            encounter,
            traits: FxHashSet::default(),
            stats: PlayerStats::default(),
            rng: None,
            clock: None,
        }
    }

    /// Record the initial history entry. Only the first call has any effect.
    pub fn start(&mut self) {
        if self.is_started() {
            return;
        }
        let now = self.clock.now();
        self.context.record(None, now);
        tracing::info!(
            encounter = %self.encounter.id,
            state = %self.context.current_state,
            "encounter started"
        );
    }

    /// Play `action` as the player's move for this round.
    pub fn perform_action(&mut self, action: SocialAction) -> ActionResult {
        if self.is_complete() {
            return ActionResult::rejected(Rejection::EncounterComplete);
        }
        if !self.is_started() {
            return ActionResult::rejected(Rejection::NotStarted);
        }
        if let Err(rejection) = resolver::ensure_available(&self.encounter, &self.context, action) {
            tracing::debug!(
                encounter = %self.encounter.id,
                state = %self.context.current_state,
                action = %action,
                "action rejected"
            );
            return ActionResult::rejected(rejection);
        }
        self.play_round(action)
    }

    /// Called by the owner of the encounter timer when it runs out.
    ///
    /// Plays a `Wait` round regardless of what the current state offers,
    /// then ends the encounter in defeat unless that round completed it.
    pub fn expire_timer(&mut self) -> ActionResult {
        if self.is_complete() {
            return ActionResult::rejected(Rejection::EncounterComplete);
        }
        if !self.is_started() {
            return ActionResult::rejected(Rejection::NotStarted);
        }
        tracing::info!(
            encounter = %self.encounter.id,
            timer_seconds = ?self.encounter.timer_seconds,
            "encounter timer expired"
        );
        let mut result = self.play_round(SocialAction::Wait);
        if !self.is_complete() {
            self.complete(Outcome::Defeat);
            result.outcome = self.outcome;
        }
        result
    }

    /// The current state's definition, with the latest dialogue override applied.
    pub fn current_state(&self) -> EncounterState {
        let mut state = self.state_definition().clone();
        if let Some(ref text) = self.dialogue_override {
            state.dialogue = text.clone();
        }
        state
    }

    /// Actions the player may take right now, in canonical order.
    /// Empty once the encounter is complete.
    pub fn available_actions(&self) -> Vec<SocialAction> {
        if self.is_complete() {
            return Vec::new();
        }
        self.state_definition().player_actions.iter().copied().collect()
    }

    pub fn context(&self) -> &EncounterContext {
        &self.context
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.context.history
    }

    pub fn encounter(&self) -> &Encounter {
        &self.encounter
    }

    pub fn is_started(&self) -> bool {
        !self.context.history.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Rewards on victory, consequences on defeat, `None` while in progress.
    pub fn rewards(&self) -> Option<Payout<'_>> {
        self.outcome.map(|outcome| match outcome {
            Outcome::Victory => Payout::Victory(&self.encounter.win_outcome.rewards),
            Outcome::Defeat => Payout::Defeat(&self.encounter.lose_outcome.consequences),
        })
    }

    /// Closing line for the finished encounter.
    pub fn outcome_dialogue(&self) -> Option<&str> {
        self.outcome.map(|outcome| match outcome {
            Outcome::Victory => self.encounter.win_outcome.dialogue.as_str(),
            Outcome::Defeat => self.encounter.lose_outcome.dialogue.as_str(),
        })
    }

    fn state_definition(&self) -> &EncounterState {
        // current_state only ever holds ids proven to exist by `validate`.
        &self.encounter.states[&self.context.current_state]
    }

    fn play_round(&mut self, action: SocialAction) -> ActionResult {
        let resolution = resolver::resolve(&self.encounter, action, &self.context, &mut self.rng);

        self.context
            .apply_deltas(resolution.reputation_change, resolution.stress_change);
        self.context.rounds_passed = self.context.rounds_passed.saturating_add(1);
        self.context.current_state = resolution.next_state;
        let now = self.clock.now();
        self.context.record(Some(action), now);
        self.dialogue_override = resolution.dialogue_override.clone();

        // The opponent only reacts when a transition fired.
        let npc_reaction = match resolution.transition {
            Some(_) => self
                .encounter
                .state(&self.context.current_state)
                .and_then(|state| resolver::npc_reaction(state, &mut self.rng))
                .cloned(),
            None => None,
        };
        if let Some(ref reaction) = npc_reaction {
            let (reputation, stress) = reaction.effect.deltas(reaction.magnitude);
            self.context.apply_deltas(reputation, stress);
        }

        tracing::debug!(
            encounter = %self.encounter.id,
            round = self.context.rounds_passed,
            action = %action,
            transition = ?resolution.transition,
            state = %self.context.current_state,
            reputation = self.context.reputation,
            stress = self.context.stress,
            "round resolved"
        );

        if any_satisfied(&self.encounter.win_conditions, &self.context) {
            self.complete(Outcome::Victory);
        } else if any_satisfied(&self.encounter.lose_conditions, &self.context) {
            self.complete(Outcome::Defeat);
        }

        ActionResult {
            success: true,
            message: None,
            rejection: None,
            transition: resolution.transition,
            dialogue_override: resolution.dialogue_override,
            check: resolution.check,
            npc_reaction,
            outcome: self.outcome,
        }
    }

    fn complete(&mut self, outcome: Outcome) {
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(outcome);
        tracing::info!(
            encounter = %self.encounter.id,
            outcome = ?outcome,
            rounds = self.context.rounds_passed,
            reputation = self.context.reputation,
            stress = self.context.stress,
            "encounter complete"
        );
    }
}

impl fmt::Debug for EncounterEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncounterEngine")
            .field("encounter", &self.encounter.id)
            .field("context", &self.context)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

impl EncounterEngineBuilder {
    pub fn traits<I, S>(mut self, traits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.traits = traits.into_iter().map(Into::into).collect();
        self
    }

    pub fn stats(mut self, stats: PlayerStats) -> Self {
        self.stats = stats;
        self
    }

    /// Seed the engine's RNG for reproducible skill checks and NPC reactions.
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = Some(StdRng::seed_from_u64(seed));
        self
    }

    /// Provide the RNG directly.
    pub fn rng(mut self, rng: StdRng) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    pub fn build(self) -> Result<EncounterEngine, ContentIntegrityError> {
        validate(&self.encounter)?;
        let context = EncounterContext::new(&self.encounter, self.traits, self.stats);
        Ok(EncounterEngine {
            encounter: self.encounter,
            context,
            rng: self.rng.unwrap_or_else(StdRng::from_entropy),
            clock: self.clock.unwrap_or_else(|| Box::new(SystemClock)),
            outcome: None,
            dialogue_override: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::schema::condition::{Comparison, Condition};
    use crate::schema::encounter::{
        InitialValues, NpcAction, NpcEffect, SkillCheck, StateId, Transition, TransitionEffects,
    };
    use crate::schema::outcome::{Consequences, LoseOutcome, Rewards, WinOutcome};
    use crate::schema::profile::Stat;
    use chrono::{DateTime, Utc};
    use std::collections::{BTreeMap, BTreeSet};

    fn state(id: &str, actions: &[SocialAction]) -> EncounterState {
        EncounterState {
            id: StateId::from(id),
            name: id.to_uppercase(),
            dialogue: format!("{} dialogue", id),
            mood: Default::default(),
            player_actions: actions.iter().copied().collect::<BTreeSet<_>>(),
            npc_actions: Vec::new(),
        }
    }

    fn effects(reputation: i32, stress: i32) -> TransitionEffects {
        TransitionEffects {
            reputation_change: Some(reputation),
            stress_change: Some(stress),
            dialogue_override: None,
        }
    }

    /// S0 --negotiate(+10)--> S1; S0 --argue(+20 stress)--> S0;
    /// S1 --negotiate(+15)--> S1; win at reputation >= 80, lose at stress >= 60.
    fn encounter() -> Encounter {
        use SocialAction::*;
        Encounter {
            id: "engine".to_string(),
            title: "Engine".to_string(),
            setting: "back office".to_string(),
            opponent_type: "manager".to_string(),
            difficulty: 2,
            initial_state: StateId::from("S0"),
            initial_values: InitialValues::default(),
            states: BTreeMap::from([
                (StateId::from("S0"), state("S0", &[Negotiate, Argue, Wait])),
                (StateId::from("S1"), state("S1", &[Negotiate, Wait])),
            ]),
            transitions: vec![
                Transition::new("S0", "S1")
                    .on(Negotiate)
                    .with_effects(effects(10, 0)),
                Transition::new("S0", "S0")
                    .on(Argue)
                    .with_effects(TransitionEffects {
                        dialogue_override: Some("Don't raise your voice.".to_string()),
                        ..effects(0, 20)
                    }),
                Transition::new("S1", "S1")
                    .on(Negotiate)
                    .with_effects(effects(15, 0)),
            ],
            win_conditions: vec![Condition::reputation(80, Comparison::Gte)],
            lose_conditions: vec![Condition::stress(60, Comparison::Gte)],
            win_outcome: WinOutcome {
                next_state: Some("promotion".to_string()),
                dialogue: "You have a deal.".to_string(),
                rewards: Rewards {
                    tips: Some(30),
                    experience: Some(50),
                    ..Default::default()
                },
            },
            lose_outcome: LoseOutcome {
                next_state: None,
                dialogue: "Get out.".to_string(),
                consequences: Consequences {
                    tips: None,
                    reputation: Some(-5),
                },
            },
            timer_seconds: Some(90),
            special_mechanics: Vec::new(),
        }
    }

    fn engine(e: Encounter) -> EncounterEngine {
        let instant = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        EncounterEngine::builder(e)
            .seed(7)
            .clock(FixedClock(instant))
            .build()
            .unwrap()
    }

    #[test]
    fn construction_validates() {
        let mut e = encounter();
        e.initial_state = StateId::from("missing");
        assert!(matches!(
            EncounterEngine::new(e, Vec::<String>::new(), PlayerStats::default()),
            Err(ContentIntegrityError::MissingInitialState { .. })
        ));
    }

    #[test]
    fn fresh_engine_is_not_started() {
        let eng = engine(encounter());
        assert!(!eng.is_started());
        assert!(!eng.is_complete());
        assert_eq!(eng.outcome(), None);
        assert!(eng.rewards().is_none());
        assert!(eng.history().is_empty());
    }

    #[test]
    fn start_is_idempotent() {
        let mut eng = engine(encounter());
        eng.start();
        eng.start();
        assert_eq!(eng.history().len(), 1);
        assert_eq!(eng.history()[0].state, StateId::from("S0"));
        assert_eq!(eng.history()[0].action, None);
    }

    #[test]
    fn actions_before_start_are_rejected() {
        let mut eng = engine(encounter());
        let result = eng.perform_action(SocialAction::Negotiate);
        assert!(!result.success);
        assert_eq!(result.rejection, Some(Rejection::NotStarted));
        assert_eq!(eng.context().rounds_passed, 0);
    }

    #[test]
    fn negotiate_moves_and_adds_reputation() {
        let mut eng = engine(encounter());
        eng.start();
        let result = eng.perform_action(SocialAction::Negotiate);
        assert!(result.success);
        assert_eq!(result.transition, Some(0));
        assert_eq!(eng.context().reputation, 60);
        assert_eq!(eng.context().current_state, StateId::from("S1"));
        assert_eq!(eng.context().rounds_passed, 1);
        assert_eq!(eng.history().len(), 2);
        assert_eq!(eng.history()[1].action, Some(SocialAction::Negotiate));
    }

    #[test]
    fn unavailable_action_leaves_context_untouched() {
        let mut eng = engine(encounter());
        eng.start();
        let before = eng.context().clone();
        let result = eng.perform_action(SocialAction::Humor);
        assert!(!result.success);
        assert_eq!(result.message.as_deref(), Some("action not available in current state"));
        assert_eq!(eng.context(), &before);
    }

    #[test]
    fn missing_transition_only_advances_bookkeeping() {
        let mut eng = engine(encounter());
        eng.start();
        let result = eng.perform_action(SocialAction::Wait);
        assert!(result.success);
        assert_eq!(result.transition, None);
        let ctx = eng.context();
        assert_eq!(ctx.current_state, StateId::from("S0"));
        assert_eq!(ctx.reputation, 50);
        assert_eq!(ctx.stress, 0);
        assert_eq!(ctx.rounds_passed, 1);
        assert_eq!(ctx.history.len(), 2);
    }

    #[test]
    fn unmatched_round_ignores_npc_reactions() {
        let mut e = encounter();
        if let Some(s0) = e.states.get_mut(&StateId::from("S0")) {
            s0.npc_actions = vec![
                NpcAction {
                    text: "paces behind the desk".to_string(),
                    effect: NpcEffect::Pressure,
                    magnitude: 30,
                },
                NpcAction {
                    text: "smiles thinly".to_string(),
                    effect: NpcEffect::Warm,
                    magnitude: 5,
                },
            ];
        }
        let mut eng = engine(e);
        eng.start();
        let before = eng.context().clone();
        let result = eng.perform_action(SocialAction::Wait);
        assert!(result.success);
        assert_eq!(result.transition, None);
        assert_eq!(result.npc_reaction, None);

        let after = eng.context();
        assert_eq!(after.current_state, before.current_state);
        assert_eq!(after.reputation, before.reputation);
        assert_eq!(after.stress, before.stress);
        assert_eq!(after.rounds_passed, before.rounds_passed + 1);
        assert_eq!(after.history.len(), before.history.len() + 1);
    }

    #[test]
    fn extreme_values_never_overflow() {
        let mut e = encounter();
        e.transitions[0] = Transition::new("S0", "S1")
            .on(SocialAction::Negotiate)
            .with_check(SkillCheck {
                stat: Stat::Social,
                target: 15,
                failure_to: None,
                failure_effects: None,
            })
            .with_effects(effects(i32::MAX, i32::MIN));
        if let Some(s1) = e.states.get_mut(&StateId::from("S1")) {
            s1.npc_actions = vec![NpcAction {
                text: "exhales slowly".to_string(),
                effect: NpcEffect::Calm,
                magnitude: i32::MIN,
            }];
        }
        let instant = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let mut eng = EncounterEngine::builder(e)
            .stats(PlayerStats::new(i32::MAX, 0, 0, 0))
            .seed(3)
            .clock(FixedClock(instant))
            .build()
            .unwrap();
        eng.start();
        let result = eng.perform_action(SocialAction::Negotiate);
        assert!(result.check.unwrap().success);
        assert_eq!(eng.context().reputation, 100);
        assert_eq!(eng.context().stress, eng.context().max_stress);
    }

    #[test]
    fn dialogue_override_applies_to_current_state_until_next_round() {
        let mut eng = engine(encounter());
        eng.start();
        let result = eng.perform_action(SocialAction::Argue);
        assert_eq!(result.dialogue_override.as_deref(), Some("Don't raise your voice."));
        assert_eq!(eng.current_state().dialogue, "Don't raise your voice.");
        assert_eq!(eng.current_state().id, StateId::from("S0"));

        eng.perform_action(SocialAction::Negotiate);
        assert_eq!(eng.current_state().dialogue, "S1 dialogue");
    }

    #[test]
    fn reaching_win_condition_latches_victory() {
        let mut eng = engine(encounter());
        eng.start();
        eng.perform_action(SocialAction::Negotiate); // 60
        eng.perform_action(SocialAction::Negotiate); // 75
        assert!(!eng.is_complete());
        assert!(eng.rewards().is_none());
        let result = eng.perform_action(SocialAction::Negotiate); // 90
        assert_eq!(result.outcome, Some(Outcome::Victory));
        assert!(eng.is_complete());
        assert_eq!(eng.outcome(), Some(Outcome::Victory));
        match eng.rewards() {
            Some(Payout::Victory(rewards)) => assert_eq!(rewards.tips, Some(30)),
            other => panic!("expected victory rewards, got {:?}", other),
        }
        assert_eq!(eng.outcome_dialogue(), Some("You have a deal."));
        assert!(eng.available_actions().is_empty());
    }

    #[test]
    fn post_completion_calls_do_not_mutate() {
        let mut eng = engine(encounter());
        eng.start();
        for _ in 0..3 {
            eng.perform_action(SocialAction::Argue);
        }
        assert_eq!(eng.outcome(), Some(Outcome::Defeat));
        let before = eng.context().clone();
        let result = eng.perform_action(SocialAction::Wait);
        assert_eq!(result.rejection, Some(Rejection::EncounterComplete));
        assert_eq!(eng.context(), &before);
        assert!(eng.is_complete());
        assert!(matches!(eng.rewards(), Some(Payout::Defeat(c)) if c.reputation == Some(-5)));
    }

    #[test]
    fn win_takes_priority_over_lose() {
        let mut e = encounter();
        e.transitions[0] = Transition::new("S0", "S1")
            .on(SocialAction::Negotiate)
            .with_effects(effects(40, 80));
        let mut eng = engine(e);
        eng.start();
        eng.perform_action(SocialAction::Negotiate);
        assert_eq!(eng.context().reputation, 90);
        assert_eq!(eng.context().stress, 80);
        assert_eq!(eng.outcome(), Some(Outcome::Victory));
    }

    #[test]
    fn resources_stay_clamped() {
        let mut e = encounter();
        e.initial_values = InitialValues {
            reputation: 95,
            stress: 0,
            max_stress: 30,
        };
        e.win_conditions.clear();
        e.lose_conditions.clear();
        e.transitions[1] = Transition::new("S0", "S0")
            .on(SocialAction::Argue)
            .with_effects(effects(-300, 500));
        let mut eng = engine(e);
        eng.start();
        eng.perform_action(SocialAction::Argue);
        assert_eq!(eng.context().reputation, 0);
        assert_eq!(eng.context().stress, 30);
    }

    #[test]
    fn state_condition_can_end_the_encounter() {
        let mut e = encounter();
        e.win_conditions = vec![Condition::state("S1")];
        let mut eng = engine(e);
        eng.start();
        eng.perform_action(SocialAction::Negotiate);
        assert_eq!(eng.outcome(), Some(Outcome::Victory));
    }

    #[test]
    fn rounds_condition_is_checked_after_increment() {
        let mut e = encounter();
        e.lose_conditions = vec![Condition::rounds(2, Comparison::Gte)];
        let mut eng = engine(e);
        eng.start();
        eng.perform_action(SocialAction::Wait);
        assert!(!eng.is_complete());
        eng.perform_action(SocialAction::Wait);
        assert_eq!(eng.outcome(), Some(Outcome::Defeat));
    }

    #[test]
    fn npc_reaction_applies_before_evaluation() {
        let mut e = encounter();
        if let Some(s1) = e.states.get_mut(&StateId::from("S1")) {
            s1.npc_actions = vec![NpcAction {
                text: "crosses their arms".to_string(),
                effect: NpcEffect::Pressure,
                magnitude: 60,
            }];
        }
        let mut eng = engine(e);
        eng.start();
        let result = eng.perform_action(SocialAction::Negotiate);
        assert_eq!(
            result.npc_reaction.as_ref().map(|r| r.text.as_str()),
            Some("crosses their arms")
        );
        assert_eq!(eng.context().stress, 60);
        assert_eq!(eng.outcome(), Some(Outcome::Defeat));
    }

    #[test]
    fn skill_check_result_is_reported() {
        let mut e = encounter();
        e.transitions[0] = Transition::new("S0", "S1")
            .on(SocialAction::Negotiate)
            .with_check(SkillCheck {
                stat: Stat::Social,
                target: 1,
                failure_to: None,
                failure_effects: None,
            })
            .with_effects(effects(10, 0));
        let mut eng = engine(e);
        eng.start();
        let result = eng.perform_action(SocialAction::Negotiate);
        let roll = result.check.unwrap();
        assert!(roll.success);
        assert_eq!(roll.target, 1);
        assert_eq!(eng.context().current_state, StateId::from("S1"));
    }

    #[test]
    fn expire_timer_forces_defeat() {
        let mut eng = engine(encounter());
        assert_eq!(eng.expire_timer().rejection, Some(Rejection::NotStarted));
        eng.start();
        eng.perform_action(SocialAction::Negotiate);
        let result = eng.expire_timer();
        assert!(result.success);
        assert_eq!(result.outcome, Some(Outcome::Defeat));
        assert_eq!(eng.context().rounds_passed, 2);
        assert_eq!(eng.history().len(), 3);
        assert_eq!(eng.history()[2].action, Some(SocialAction::Wait));
        assert_eq!(eng.expire_timer().rejection, Some(Rejection::EncounterComplete));
    }

    #[test]
    fn expire_timer_respects_a_win_on_the_final_round() {
        let mut e = encounter();
        e.transitions.push(
            Transition::new("S1", "S1")
                .on(SocialAction::Wait)
                .with_effects(effects(30, 0)),
        );
        let mut eng = engine(e);
        eng.start();
        eng.perform_action(SocialAction::Negotiate);
        let result = eng.expire_timer();
        assert_eq!(result.outcome, Some(Outcome::Victory));
    }

    #[test]
    fn available_actions_in_canonical_order() {
        let mut eng = engine(encounter());
        eng.start();
        assert_eq!(
            eng.available_actions(),
            vec![SocialAction::Negotiate, SocialAction::Argue, SocialAction::Wait]
        );
    }

    #[test]
    fn same_seed_same_replay() {
        let mut e = encounter();
        e.transitions[0] = Transition::new("S0", "S1")
            .on(SocialAction::Negotiate)
            .with_check(SkillCheck {
                stat: Stat::Social,
                target: 14,
                failure_to: None,
                failure_effects: Some(effects(-5, 10)),
            })
            .with_effects(effects(10, 0));
        let script = [
            SocialAction::Negotiate,
            SocialAction::Negotiate,
            SocialAction::Negotiate,
            SocialAction::Negotiate,
        ];

        let mut a = engine(e.clone());
        let mut b = engine(e);
        a.start();
        b.start();
        for action in script {
            assert_eq!(a.perform_action(action), b.perform_action(action));
        }
        assert_eq!(a.context(), b.context());
        assert_eq!(a.outcome(), b.outcome());
    }
}
