//! Data-driven battle content and loaders.
//!
//! This crate houses the static definitions a battle is set up from and the
//! loaders that turn RON/TOML files into validated `battle-core` values:
//! - Combat tables (data-driven via TOML)
//! - Ability kits (data-driven via RON)
//! - Player roster and levels (data-driven via RON)
//! - Boss strategy graphs (data-driven via RON)
//!
//! Every loader validates what it reads, so malformed content fails at
//! setup time and never mid-battle.

pub mod battle;
pub mod loaders;

pub use battle::{Battle, Combatant};
pub use loaders::{
    AbilityLoader, ConfigLoader, ContentFactory, LevelSpec, LoadResult, PlayerSpec, Roster,
    RosterLoader, StrategyLoader, StrategySpec,
};
