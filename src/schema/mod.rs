//! Authored content types. Everything here is plain data loaded from RON
//! (or JSON across the wasm boundary) and never mutated by the engine.

pub mod action;
pub mod condition;
pub mod encounter;
pub mod outcome;
pub mod profile;
