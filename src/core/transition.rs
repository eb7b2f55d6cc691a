/// Transition selection: first declared match wins.
use crate::core::condition::guard_satisfied;
use crate::core::context::EncounterContext;
use crate::schema::action::SocialAction;
use crate::schema::encounter::{Encounter, Transition};

/// Find the transition that applies to `action` in the context's current state.
///
/// Transitions are scanned in declaration order. A candidate matches when its
/// `from` is the current state, its `action` equals `action` (or is absent),
/// its guard holds and every requirement is met by the player profile.
/// Returns the index into `encounter.transitions` together with the entry.
pub fn select<'a>(
    encounter: &'a Encounter,
    action: SocialAction,
    ctx: &EncounterContext,
) -> Option<(usize, &'a Transition)> {
    encounter
        .transitions
        .iter()
        .enumerate()
        .find(|(_, t)| t.from == ctx.current_state && applies(t, action, ctx))
}

fn applies(transition: &Transition, action: SocialAction, ctx: &EncounterContext) -> bool {
    if transition.action.is_some_and(|a| a != action) {
        return false;
    }
    if let Some(ref guard) = transition.condition {
        if !guard_satisfied(guard, ctx) {
            return false;
        }
    }
    transition
        .requires
        .iter()
        .all(|r| r.is_met(&ctx.player_traits, &ctx.player_stats))
}
