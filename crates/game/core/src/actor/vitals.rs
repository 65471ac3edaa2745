//! Per-turn derived stats and status conditions.

use bitflags::bitflags;

bitflags! {
    /// Status conditions currently affecting an actor.
    ///
    /// Conditions are applied by the external buff manager; the decision
    /// rules only read them.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Conditions: u8 {
        /// Hovering: cannot touch items or field objects.
        const FLOAT     = 1 << 0;
        const BLIND     = 1 << 1;
        const SLOW      = 1 << 2;
        const HASTE     = 1 << 3;
        const SLEEP     = 1 << 4;
        const INVISIBLE = 1 << 5;
    }
}

/// Stats derived at the start of each turn from level, equipment and buffs.
///
/// Computed by the external stat collaborators and handed to the actor with
/// [`ActiveObject::apply_turn_data`](super::ActiveObject::apply_turn_data).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnData {
    pub hp_max: f64,
    pub sp_max: f64,
    pub sight: f64,
    pub level: u32,
    pub conditions: Conditions,
}

impl TurnData {
    pub fn new(hp_max: f64, sp_max: f64, sight: f64, level: u32) -> Self {
        Self {
            hp_max,
            sp_max,
            sight,
            level,
            conditions: Conditions::empty(),
        }
    }

    pub fn with_conditions(mut self, conditions: Conditions) -> Self {
        self.conditions = conditions;
        self
    }
}

/// Clamps a vital into `[0, max]`; a negative max counts as 0.
pub(crate) fn clamp_vital(value: f64, max: f64) -> f64 {
    let max = max.max(0.0);
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max)
}
