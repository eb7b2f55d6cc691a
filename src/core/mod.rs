//! Runtime: validation, evaluation, resolution and the engine itself.

pub mod clock;
pub mod condition;
pub mod context;
pub mod engine;
pub mod library;
pub mod resolver;
pub mod transition;
pub mod validate;
