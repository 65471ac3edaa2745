use crate::error::ConfigError;

/// Game configuration constants and tunable parameters.
///
/// Every value the lifecycle and decision rules depend on is named here
/// rather than derived, so servers and clients agree on them by sharing one
/// config file.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Fraction of max HP restored on rebirth.
    pub rebirth_hp_rate: f64,
    /// Fraction of max SP restored on rebirth.
    pub rebirth_sp_rate: f64,

    /// Equipment count autonomous actors are topped up to (players start with twice this).
    pub init_equip_count: u32,
    pub init_potion_count: u32,
    pub init_scroll_count: u32,
    /// Mean of the gold grant; also the wallet level below which gold is granted.
    pub init_gold_mean: f64,

    /// `abs_sum` of a freshly created actor's alignment.
    pub base_bias_len: f64,
    /// Range of `abs_sum` for randomly created equipment.
    pub equip_bias_min: f64,
    pub equip_bias_max: f64,

    /// Sight an actor is expected to have at level 0.
    pub sight_base: f64,
    /// Additional expected sight per level.
    pub sight_per_level: f64,
}

impl GameConfig {
    // ===== fixed policy constants =====
    /// Minimum score gain before an equipment swap is worth it.
    pub const HYSTERESIS_MARGIN: f64 = 1.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_REBIRTH_HP_RATE: f64 = 0.5;
    pub const DEFAULT_REBIRTH_SP_RATE: f64 = 0.5;
    pub const DEFAULT_INIT_EQUIP_COUNT: u32 = 8;
    pub const DEFAULT_INIT_POTION_COUNT: u32 = 4;
    pub const DEFAULT_INIT_SCROLL_COUNT: u32 = 2;
    pub const DEFAULT_INIT_GOLD_MEAN: f64 = 100.0;
    pub const DEFAULT_BASE_BIAS_LEN: f64 = 10.0;
    pub const DEFAULT_EQUIP_BIAS_MIN: f64 = 1.0;
    pub const DEFAULT_EQUIP_BIAS_MAX: f64 = 10.0;
    pub const DEFAULT_SIGHT_BASE: f64 = 3.0;
    pub const DEFAULT_SIGHT_PER_LEVEL: f64 = 0.5;

    pub fn new() -> Self {
        Self {
            rebirth_hp_rate: Self::DEFAULT_REBIRTH_HP_RATE,
            rebirth_sp_rate: Self::DEFAULT_REBIRTH_SP_RATE,
            init_equip_count: Self::DEFAULT_INIT_EQUIP_COUNT,
            init_potion_count: Self::DEFAULT_INIT_POTION_COUNT,
            init_scroll_count: Self::DEFAULT_INIT_SCROLL_COUNT,
            init_gold_mean: Self::DEFAULT_INIT_GOLD_MEAN,
            base_bias_len: Self::DEFAULT_BASE_BIAS_LEN,
            equip_bias_min: Self::DEFAULT_EQUIP_BIAS_MIN,
            equip_bias_max: Self::DEFAULT_EQUIP_BIAS_MAX,
            sight_base: Self::DEFAULT_SIGHT_BASE,
            sight_per_level: Self::DEFAULT_SIGHT_PER_LEVEL,
        }
    }

    /// Sight an actor of `level` should have; vision potions are worth
    /// drinking at or below it.
    pub fn sight_for_level(&self, level: u32) -> f64 {
        self.sight_base + self.sight_per_level * level as f64
    }

    /// Checks that rates and ranges are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rates = [
            ("rebirth_hp_rate", self.rebirth_hp_rate),
            ("rebirth_sp_rate", self.rebirth_sp_rate),
        ];
        for (field, value) in rates {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RateOutOfRange { field, value });
            }
        }

        let non_negative = [
            ("init_gold_mean", self.init_gold_mean),
            ("base_bias_len", self.base_bias_len),
            ("equip_bias_min", self.equip_bias_min),
            ("sight_base", self.sight_base),
            ("sight_per_level", self.sight_per_level),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.equip_bias_max < self.equip_bias_min {
            return Err(ConfigError::EmptyRange {
                field: "equip_bias",
                min: self.equip_bias_min,
                max: self.equip_bias_max,
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
