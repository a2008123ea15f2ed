//! Player roster and level loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Static stats of a player soldier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub name: String,
    pub health: u32,
    pub energy: u32,
    pub attack: u32,
    /// Name of the ability kit in `abilities.ron`.
    pub kit: String,
}

/// One level: the boss and the strategy graph it follows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSpec {
    pub id: u32,
    pub boss_name: String,
    pub boss_health: u32,
    pub boss_attack: u32,
    /// File stem under `strategies/`.
    pub strategy: String,
}

/// Roster structure for RON files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub players: Vec<PlayerSpec>,
    pub levels: Vec<LevelSpec>,
}

impl Roster {
    pub fn level(&self, id: u32) -> Option<&LevelSpec> {
        self.levels.iter().find(|level| level.id == id)
    }
}

/// Loader for the roster from RON files.
pub struct RosterLoader;

impl RosterLoader {
    pub fn load(path: &Path) -> LoadResult<Roster> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
    }

    /// Parse a roster and check that every combatant can exist.
    pub fn parse(content: &str) -> LoadResult<Roster> {
        let roster: Roster = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        if roster.players.is_empty() {
            anyhow::bail!("Roster has no players");
        }
        for player in &roster.players {
            if player.health == 0 {
                anyhow::bail!("Player '{}' has zero health", player.name);
            }
        }
        for (index, level) in roster.levels.iter().enumerate() {
            if level.boss_health == 0 {
                anyhow::bail!("Level {} boss '{}' has zero health", level.id, level.boss_name);
            }
            if roster.levels[..index].iter().any(|other| other.id == level.id) {
                anyhow::bail!("Duplicate level id {}", level.id);
            }
        }

        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER: &str = r#"(
        players: [(name: "Soldado Daño", health: 100, energy: 100, attack: 20, kit: "asalto")],
        levels: [(id: 1, boss_name: "Donald T.", boss_health: 300, boss_attack: 25, strategy: "standard")],
    )"#;

    #[test]
    fn finds_level_by_id() {
        let roster = RosterLoader::parse(ROSTER).unwrap();
        assert_eq!(roster.level(1).unwrap().boss_name, "Donald T.");
        assert!(roster.level(2).is_none());
    }

    #[test]
    fn rejects_zero_health_boss() {
        let broken = ROSTER.replace("boss_health: 300", "boss_health: 0");
        assert!(RosterLoader::parse(&broken).is_err());
    }
}
