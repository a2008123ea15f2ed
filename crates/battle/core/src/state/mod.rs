//! Mutable combat state.
//!
//! An [`Entity`] is a base record plus an optional boss extension. Entities
//! are created at battle start, mutated by the resolver every turn, and never
//! removed: zero health marks a defeated combatant that can still be queried.
mod boss;
mod entity;
mod resources;
mod snapshot;

pub use boss::BossStats;
pub use entity::{CoreStats, DamageTaken, Entity, ShieldLayer, ShieldStack};
pub use resources::ResourceMeter;
pub use snapshot::{BossSnapshot, EntitySnapshot, SnapshotError};
