//! Attack resolution.
//!
//! A fixed-depth binary decision tree maps a base power and a roll source to
//! one of four outcomes. The tree is built once from the [`AttackTable`]
//! and holds no mutable state; only the rolls vary between invocations.
//!
//! [`AttackTable`]: crate::config::AttackTable

pub mod outcome;
pub mod tree;

pub use outcome::{AttackOutcome, OutcomeKind};
pub use tree::{AttackTree, DecisionNode, resolve_attack};
