use arrayvec::ArrayVec;

use super::{BossStats, ResourceMeter};
use crate::config::CombatConfig;
use crate::graph::Status;

/// One unit of full-hit absorption.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShieldLayer;

/// LIFO stack of shield layers.
pub type ShieldStack = ArrayVec<ShieldLayer, { CombatConfig::MAX_SHIELD_LAYERS }>;

/// Result of [`Entity::receive_damage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageTaken {
    /// A shield layer absorbed the whole hit.
    Blocked,
    /// Health actually removed (may be less than the incoming amount).
    Dealt(u32),
}

impl DamageTaken {
    pub fn amount(self) -> u32 {
        match self {
            Self::Blocked => 0,
            Self::Dealt(amount) => amount,
        }
    }
}

/// Attributes shared by every combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoreStats {
    pub name: String,
    pub health: ResourceMeter,
    pub energy: ResourceMeter,
    /// Base attack power.
    pub attack: u32,
    pub status: Status,
    pub shields: ShieldStack,
    /// Remaining turns of burning.
    pub burn_turns: u32,
    /// Remaining turns of halved energy costs.
    pub motivation_turns: u32,
}

/// A combatant: base record plus the boss extension when present.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub core: CoreStats,
    pub boss: Option<BossStats>,
}

impl Entity {
    /// Creates a combatant at full health and energy.
    pub fn new(name: impl Into<String>, max_health: u32, max_energy: u32, attack: u32) -> Self {
        Self {
            core: CoreStats {
                name: name.into(),
                health: ResourceMeter::full(max_health),
                energy: ResourceMeter::full(max_energy),
                attack,
                status: Status::Normal,
                shields: ShieldStack::new(),
                burn_turns: 0,
                motivation_turns: 0,
            },
            boss: None,
        }
    }

    /// Creates a boss. Bosses pay for moves with health, not energy.
    pub fn new_boss(name: impl Into<String>, max_health: u32, attack: u32, boss: BossStats) -> Self {
        let mut entity = Self::new(name, max_health, 0, attack);
        entity.boss = Some(boss);
        entity
    }

    pub fn name(&self) -> &str {
        &self.core.name
    }

    pub fn health(&self) -> u32 {
        self.core.health.current()
    }

    pub fn max_health(&self) -> u32 {
        self.core.health.maximum()
    }

    pub fn energy(&self) -> u32 {
        self.core.energy.current()
    }

    pub fn status(&self) -> Status {
        self.core.status
    }

    pub fn set_status(&mut self, status: Status) {
        self.core.status = status;
    }

    pub fn is_boss(&self) -> bool {
        self.boss.is_some()
    }

    pub fn is_alive(&self) -> bool {
        !self.core.health.is_empty()
    }

    pub fn health_percent(&self) -> u32 {
        self.core.health.percent()
    }

    pub fn is_motivated(&self) -> bool {
        self.core.motivation_turns > 0
    }

    pub fn shield_layers(&self) -> usize {
        self.core.shields.len()
    }

    /// Applies an incoming hit.
    ///
    /// A non-empty shield stack loses its top layer and absorbs the entire
    /// amount, whatever its magnitude. Otherwise health drops, floored at 0.
    pub fn receive_damage(&mut self, amount: u32) -> DamageTaken {
        if self.core.shields.pop().is_some() {
            return DamageTaken::Blocked;
        }
        DamageTaken::Dealt(self.core.health.drain(amount))
    }

    /// Restores health, capped at the maximum. Returns the amount healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        self.core.health.restore(amount)
    }

    /// Energy actually charged for `cost`: halved (floor) while motivated.
    pub fn effective_cost(&self, cost: u32) -> u32 {
        if self.is_motivated() { cost / 2 } else { cost }
    }

    /// Deducts the effective cost if affordable. Energy is untouched on failure.
    pub fn spend_energy(&mut self, cost: u32) -> bool {
        let cost = self.effective_cost(cost);
        if self.core.energy.current() < cost {
            return false;
        }
        self.core.energy.drain(cost);
        true
    }

    /// Adds the per-turn regeneration, capped at the maximum.
    pub fn regenerate_energy(&mut self, amount: u32) -> u32 {
        self.core.energy.restore(amount)
    }

    /// Pushes up to `count` layers. Returns how many fit.
    pub fn add_shield_layers(&mut self, count: u32) -> u32 {
        let mut added = 0;
        for _ in 0..count {
            if self.core.shields.try_push(ShieldLayer).is_err() {
                tracing::warn!(
                    "{}: shield stack full ({} layers), dropping extra layer",
                    self.core.name,
                    self.core.shields.len()
                );
                break;
            }
            added += 1;
        }
        added
    }
}
