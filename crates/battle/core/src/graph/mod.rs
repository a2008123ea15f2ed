//! Directed graphs that drive state changes.
//!
//! - [`status`]: combat conditions with event-triggered transitions
//! - [`mood`]: boss behavioral FSM with attached multipliers
//! - [`strategy`]: weighted move graph used for boss move selection
//!
//! The status and mood graphs are built once as immutable adjacency tables;
//! unmatched `(state, event)` pairs are no-ops, never errors.

pub mod mood;
pub mod status;
pub mod strategy;

pub use mood::{Mood, MoodBonuses, MoodEvent, MoodGraph, derive_mood_event};
pub use status::{Status, StatusEvent, StatusGraph, status_transition};
pub use strategy::{
    BuffTarget, MoveArchetype, MoveEffect, MoveId, StrategyError, StrategyGraph, StrategyEdge,
};
