//! Deterministic decision core of the turn-based battle simulator.
//!
//! `battle-core` decides whether an action lands, how much damage or healing
//! results, how status effects evolve, and which move the boss takes next.
//! Every random decision pulls from an injected [`RollOracle`], so a fixed
//! seed reproduces an exact battle. All mutation of combatants flows through
//! [`CombatResolver`]; rendering, input and persistence layers consume the
//! [`TurnResult`] reports it returns.
pub mod ability;
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod graph;
pub mod resolver;
pub mod state;

pub use ability::{Ability, AbilityCategory, AbilityError};
pub use combat::{AttackOutcome, AttackTree, DecisionNode, OutcomeKind, resolve_attack};
pub use config::{
    AttackTable, BossTable, BranchOdds, CombatConfig, ConfigError, EffectTable, MoodThresholds,
    StressTable,
};
pub use env::{PcgRng, RollOracle, ScriptedRolls, compute_seed};
pub use error::{CombatError, ErrorSeverity};
pub use graph::{
    BuffTarget, Mood, MoodBonuses, MoodEvent, MoodGraph, MoveArchetype, MoveEffect, MoveId,
    Status, StatusEvent, StatusGraph, StrategyEdge, StrategyError, StrategyGraph,
    derive_mood_event, status_transition,
};
pub use resolver::{
    CombatResolver, Side, TurnEffect, TurnResult, TurnStart, lowest_health, stress_gain,
};
pub use state::{
    BossSnapshot, BossStats, CoreStats, DamageTaken, Entity, EntitySnapshot, ResourceMeter,
    ShieldLayer, ShieldStack, SnapshotError,
};
