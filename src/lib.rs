//! Encounter Engine: resolution of turn-based social encounters for games.
//!
//! An encounter is a content-authored state machine between the player and
//! an NPC. The player picks a [`SocialAction`](schema::action::SocialAction)
//! each round; transitions move the encounter between states and shift two
//! bounded resources, reputation and stress, until a win or lose condition
//! fires. The engine never touches global game state: rewards are handed
//! back to the caller.

pub mod core;
pub mod schema;

pub use crate::core::engine::{EncounterEngine, EncounterEngineBuilder};
pub use crate::core::resolver::{ActionResult, Rejection};
pub use crate::core::validate::ContentIntegrityError;
pub use crate::schema::action::SocialAction;
pub use crate::schema::encounter::Encounter;
pub use crate::schema::outcome::{Outcome, Payout};
