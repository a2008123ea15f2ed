//! Ability kit loader.

use std::collections::HashMap;
use std::path::Path;

use battle_core::Ability;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Named set of abilities a combatant can use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityKit {
    pub name: String,
    pub abilities: Vec<Ability>,
}

/// Ability catalog structure for RON files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityCatalog {
    pub kits: Vec<AbilityKit>,
}

/// Loader for ability kits from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load every kit, keyed by kit name.
    pub fn load(path: &Path) -> LoadResult<HashMap<String, Vec<Ability>>> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
    }

    /// Parse a catalog and validate each ability.
    pub fn parse(content: &str) -> LoadResult<HashMap<String, Vec<Ability>>> {
        let catalog: AbilityCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability catalog RON: {}", e))?;

        let mut kits = HashMap::with_capacity(catalog.kits.len());
        for kit in catalog.kits {
            for ability in &kit.abilities {
                ability
                    .validate()
                    .map_err(|e| anyhow::anyhow!("Kit '{}': {}", kit.name, e))?;
            }
            if kits.insert(kit.name.clone(), kit.abilities).is_some() {
                anyhow::bail!("Duplicate ability kit '{}'", kit.name);
            }
        }

        Ok(kits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{AbilityCategory, StatusEvent};

    #[test]
    fn parses_spanish_tags() {
        let kits = AbilityLoader::parse(
            r#"(
                kits: [
                    (
                        name: "asalto",
                        abilities: [
                            (name: "Cuchillada", cost: 30, category: ataque, power: 25, event: Some(sangrado)),
                        ],
                    ),
                ],
            )"#,
        )
        .unwrap();

        let ability = &kits["asalto"][0];
        assert_eq!(ability.category, AbilityCategory::Attack);
        assert_eq!(ability.event, Some(StatusEvent::Blade));
    }

    #[test]
    fn rejects_invalid_ability() {
        let err = AbilityLoader::parse(
            r#"(kits: [(name: "medic", abilities: [(name: "Placebo", cost: 5, category: heal)])])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Placebo"), "{err}");
    }

    #[test]
    fn rejects_duplicate_kits() {
        let err = AbilityLoader::parse(r#"(kits: [(name: "a", abilities: []), (name: "a", abilities: [])])"#)
            .unwrap_err();
        assert!(err.to_string().contains("Duplicate"), "{err}");
    }
}
