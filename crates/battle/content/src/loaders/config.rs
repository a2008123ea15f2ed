//! Combat configuration loader.

use std::path::Path;

use battle_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat tables from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a [`CombatConfig`] from a TOML file.
    ///
    /// Missing tables or fields fall back to their defaults; probability
    /// partitions must be given explicitly.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
    }

    /// Parse and validate a TOML document.
    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid combat config: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(ConfigLoader::parse("").unwrap(), CombatConfig::default());
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config = ConfigLoader::parse(
            r#"
            [effects]
            burn_damage = 20
            "#,
        )
        .unwrap();

        assert_eq!(config.effects.burn_damage, 20);
        assert_eq!(config.effects.bleed_damage, 10);
        assert_eq!(config.attack.critical_multiplier, 1.5);
    }

    #[test]
    fn rejects_incoherent_partition() {
        let err = ConfigLoader::parse(
            r#"
            [attack]
            hit = { pass = 0.8, fail = 0.1 }
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("Invalid combat config"), "{err}");
    }
}
