//! A battle assembled from content, ready for a turn loop to drive.

use battle_core::{Ability, CombatResolver, Entity};

use crate::loaders::LevelSpec;

/// A player soldier and the abilities it can choose from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combatant {
    pub entity: Entity,
    pub abilities: Vec<Ability>,
}

impl Combatant {
    /// Looks up an ability by name.
    pub fn ability(&self, name: &str) -> Option<&Ability> {
        self.abilities.iter().find(|ability| ability.name == name)
    }

    /// Abilities the combatant can currently pay for.
    pub fn affordable(&self) -> impl Iterator<Item = &Ability> {
        self.abilities
            .iter()
            .filter(|ability| self.entity.effective_cost(ability.cost) <= self.entity.energy())
    }
}

/// Resolver, players and boss for one level.
#[derive(Debug, Clone)]
pub struct Battle {
    pub level: LevelSpec,
    pub resolver: CombatResolver,
    pub players: Vec<Combatant>,
    pub boss: Entity,
}

impl Battle {
    /// Whether the boss or every player is down.
    pub fn is_over(&self) -> bool {
        !self.boss.is_alive() || self.players.iter().all(|p| !p.entity.is_alive())
    }
}
