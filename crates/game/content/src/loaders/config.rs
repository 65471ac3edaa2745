//! Game configuration loader.

use std::path::Path;

use anyhow::Context;
use tower_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
///
/// Missing keys fall back to the [`GameConfig`] defaults, so a file only
/// needs to list what it changes. The result is validated before it is
/// returned.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing GameConfig
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Parse and validate config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig =
            toml::from_str(content).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse("init_equip_count = 5\nrebirth_hp_rate = 0.25\n").unwrap();

        assert_eq!(config.init_equip_count, 5);
        assert_eq!(config.rebirth_hp_rate, 0.25);
        assert_eq!(config.init_potion_count, GameConfig::DEFAULT_INIT_POTION_COUNT);
        assert_eq!(config.base_bias_len, GameConfig::DEFAULT_BASE_BIAS_LEN);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(ConfigLoader::parse("").unwrap(), GameConfig::default());
    }

    #[test]
    fn out_of_range_rate_is_rejected() {
        let err = ConfigLoader::parse("rebirth_sp_rate = 1.5").unwrap_err();
        assert!(err.to_string().contains("rebirth_sp_rate"));
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "init_gold_mean = 40.0").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.init_gold_mean, 40.0);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = ConfigLoader::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("absent.toml"));
    }
}
