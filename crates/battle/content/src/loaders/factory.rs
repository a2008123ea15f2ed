//! Content factory for building battles from data files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use battle_core::{Ability, BossStats, CombatConfig, CombatResolver, Entity, MoveId, StrategyGraph};

use crate::battle::{Battle, Combatant};
use crate::loaders::{
    AbilityLoader, ConfigLoader, LoadResult, Roster, RosterLoader, StrategyLoader,
};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── abilities.ron
/// ├── roster.ron
/// └── strategies/
///     └── standard.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load combat tables from `config.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load ability kits from `abilities.ron`.
    pub fn load_abilities(&self) -> LoadResult<HashMap<String, Vec<Ability>>> {
        AbilityLoader::load(&self.data_dir.join("abilities.ron"))
    }

    /// Load players and levels from `roster.ron`.
    pub fn load_roster(&self) -> LoadResult<Roster> {
        RosterLoader::load(&self.data_dir.join("roster.ron"))
    }

    /// Load a strategy graph from `strategies/{name}.ron`.
    pub fn load_strategy(&self, name: &str) -> LoadResult<(StrategyGraph, MoveId)> {
        let path = self.data_dir.join("strategies").join(format!("{}.ron", name));
        StrategyLoader::load(&path)
    }

    /// Assemble the battle for level `level_id`.
    pub fn build_battle(&self, level_id: u32) -> LoadResult<Battle> {
        let config = self.load_config()?;
        let kits = self.load_abilities()?;
        let roster = self.load_roster()?;

        let level = roster
            .level(level_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Level {} not found in roster", level_id))?;
        let (strategy, opening) = self.load_strategy(&level.strategy)?;

        let players = roster
            .players
            .iter()
            .map(|spec| {
                let abilities = kits.get(&spec.kit).cloned().ok_or_else(|| {
                    anyhow::anyhow!("Player '{}' uses unknown kit '{}'", spec.name, spec.kit)
                })?;
                Ok(Combatant {
                    entity: Entity::new(&spec.name, spec.health, spec.energy, spec.attack),
                    abilities,
                })
            })
            .collect::<LoadResult<Vec<_>>>()?;

        let boss = Entity::new_boss(
            &level.boss_name,
            level.boss_health,
            level.boss_attack,
            BossStats::from_table(&config.boss, opening),
        );

        let resolver = CombatResolver::new(config)
            .map_err(|e| anyhow::anyhow!("Invalid combat config: {}", e))?
            .with_strategy(strategy);

        tracing::info!(
            "loaded level {} ({} vs {} players, {} moves)",
            level.id,
            level.boss_name,
            players.len(),
            resolver.strategy().len()
        );

        Ok(Battle {
            level,
            resolver,
            players,
            boss,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}
