//! Runtime configuration read from the process environment.

use std::env;
use std::path::PathBuf;

use tower_content::ConfigLoader;
use tower_core::{AutoActs, GameConfig};

use crate::error::{Result, RuntimeError};

/// Settings for a simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    /// TOML file with [`GameConfig`] overrides; defaults are used when unset.
    pub game_config_path: Option<PathBuf>,
    /// Seed of the world generator every actor generator is forked from.
    pub seed: u64,
    pub turns: u64,
    /// Number of autonomous actors to spawn.
    pub actors: usize,
    pub auto_acts: AutoActs,
    /// RON name list for autonomous actors.
    pub names_path: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config_path: None,
            seed: Self::DEFAULT_SEED,
            turns: Self::DEFAULT_TURNS,
            actors: Self::DEFAULT_ACTORS,
            auto_acts: AutoActs::default(),
            names_path: None,
        }
    }
}

impl RuntimeConfig {
    pub const DEFAULT_SEED: u64 = 0x7017_e5ed;
    pub const DEFAULT_TURNS: u64 = 20;
    pub const DEFAULT_ACTORS: usize = 8;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TOWER_CONFIG` - Path to a GameConfig TOML file
    /// - `TOWER_NAMES` - Path to a RON name list
    /// - `TOWER_SEED` - World seed (decimal or `0x` hex)
    /// - `TOWER_TURNS` - Turns to simulate (default: 20)
    /// - `TOWER_ACTORS` - Autonomous actors to spawn (default: 8)
    /// - `TOWER_AUTO_ACTS` - Comma-separated stages, e.g. `battle,equip`, or `all` / `none`
    ///
    /// Malformed values are reported rather than silently replaced.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = lookup("TOWER_CONFIG") {
            config.game_config_path = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup("TOWER_NAMES") {
            config.names_path = Some(PathBuf::from(path));
        }
        if let Some(value) = lookup("TOWER_SEED") {
            config.seed = parse_seed(&value).ok_or(RuntimeError::InvalidEnv {
                key: "TOWER_SEED",
                value,
            })?;
        }
        if let Some(value) = lookup("TOWER_TURNS") {
            config.turns = value.trim().parse().map_err(|_| RuntimeError::InvalidEnv {
                key: "TOWER_TURNS",
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup("TOWER_ACTORS") {
            config.actors = value.trim().parse().map_err(|_| RuntimeError::InvalidEnv {
                key: "TOWER_ACTORS",
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup("TOWER_AUTO_ACTS") {
            config.auto_acts = parse_auto_acts(&value).ok_or(RuntimeError::InvalidEnv {
                key: "TOWER_AUTO_ACTS",
                value,
            })?;
        }

        Ok(config)
    }

    /// Loads the game rules this run uses.
    pub fn load_game_config(&self) -> Result<GameConfig> {
        match &self.game_config_path {
            Some(path) => ConfigLoader::load(path).map_err(|source| RuntimeError::Config {
                path: path.clone(),
                source,
            }),
            None => Ok(GameConfig::default()),
        }
    }
}

fn parse_seed(value: &str) -> Option<u64> {
    let value = value.trim();
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    }
}

/// Parses a comma-separated list of stage names into [`AutoActs`].
pub fn parse_auto_acts(value: &str) -> Option<AutoActs> {
    let value = value.trim();
    match value.to_ascii_lowercase().as_str() {
        "all" => return Some(AutoActs::all()),
        "none" | "" => return Some(AutoActs::empty()),
        _ => {}
    }

    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .try_fold(AutoActs::empty(), |acts, part| {
            let flag = match part.to_ascii_lowercase().as_str() {
                "battle" => AutoActs::BATTLE,
                "pickup" => AutoActs::PICKUP,
                "equip" => AutoActs::EQUIP,
                "use_potion_scroll" | "use" => AutoActs::USE_POTION_SCROLL,
                "recycle_potion_scroll" => AutoActs::RECYCLE_POTION_SCROLL,
                "recycle_equip" => AutoActs::RECYCLE_EQUIP,
                _ => return None,
            };
            Some(acts | flag)
        })
}
