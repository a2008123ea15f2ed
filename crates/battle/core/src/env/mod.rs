//! Oracles the core consumes from its environment.
//!
//! The only external input the resolver needs at resolution time is a source
//! of uniform rolls. Everything else (tables, abilities, strategy graphs) is
//! handed over once at setup.

pub mod rng;

pub use rng::{PcgRng, RollOracle, ScriptedRolls, compute_seed};
