//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`GameConfig::default`]. A configuration
    /// without floors or without party members is rejected.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from a TOML string.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.max_floors == 0 {
            anyhow::bail!("max_floors must be at least 1");
        }
        if config.party_size == 0 {
            anyhow::bail!("party_size must be at least 1");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse("max_floors = 6\n").unwrap();
        assert_eq!(config.max_floors, 6);
        assert_eq!(config.party_size, GameConfig::DEFAULT_PARTY_SIZE);
        assert_eq!(config.room_choices_per_floor, GameConfig::DEFAULT_ROOM_CHOICES);
    }

    #[test]
    fn zero_floors_rejected() {
        let err = ConfigLoader::parse("max_floors = 0\n").unwrap_err();
        assert!(err.to_string().contains("max_floors"));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(ConfigLoader::parse("max_floors = \"many\"").is_err());
    }
}
