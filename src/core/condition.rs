/// Condition evaluation against the live encounter context.
use crate::core::context::EncounterContext;
use crate::schema::condition::{Condition, TransitionCondition};

/// Evaluate a single condition. Pure; never touches the context.
pub fn evaluate(condition: &Condition, ctx: &EncounterContext) -> bool {
    match condition {
        Condition::Reputation { value, comparison } => {
            comparison.compare(i64::from(ctx.reputation), i64::from(*value))
        }
        Condition::Stress { value, comparison } => {
            comparison.compare(i64::from(ctx.stress), i64::from(*value))
        }
        Condition::Rounds { value, comparison } => {
            comparison.compare(i64::from(ctx.rounds_passed), i64::from(*value))
        }
        Condition::State { state } => &ctx.current_state == state,
    }
}

/// True if any condition in the list holds. An empty list never holds.
pub fn any_satisfied(conditions: &[Condition], ctx: &EncounterContext) -> bool {
    conditions.iter().any(|c| evaluate(c, ctx))
}

/// True if every bound present on a transition guard holds.
pub fn guard_satisfied(guard: &TransitionCondition, ctx: &EncounterContext) -> bool {
    guard.as_conditions().iter().all(|c| evaluate(c, ctx))
}
