//! Achievement and usage counters kept for the lifetime of an actor.

use std::collections::BTreeMap;

use crate::item::{PotionKind, ScrollKind};

/// Things an actor gets credit for.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(usize)]
pub enum AchieveKind {
    MoneyGet,
    Kill,
    Death,
    Rebirth,
    PotionUse,
    ScrollUse,
    Equip,
    UnEquip,
    Recycle,
    Pickup,
}

impl AchieveKind {
    pub const COUNT: usize = 10;
}

/// Accumulated amount per [`AchieveKind`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AchieveStats {
    values: [f64; AchieveKind::COUNT],
}

impl AchieveStats {
    pub fn add(&mut self, kind: AchieveKind, amount: f64) {
        self.values[kind as usize] += amount;
    }

    pub fn inc(&mut self, kind: AchieveKind) {
        self.add(kind, 1.0);
    }

    pub fn get(&self, kind: AchieveKind) -> f64 {
        self.values[kind as usize]
    }
}

/// How many of each consumable kind an actor has used.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UsageStats {
    potions: BTreeMap<PotionKind, u32>,
    scrolls: BTreeMap<ScrollKind, u32>,
}

impl UsageStats {
    pub fn record_potion(&mut self, kind: PotionKind) {
        *self.potions.entry(kind).or_default() += 1;
    }

    pub fn record_scroll(&mut self, kind: ScrollKind) {
        *self.scrolls.entry(kind).or_default() += 1;
    }

    pub fn potion(&self, kind: PotionKind) -> u32 {
        self.potions.get(&kind).copied().unwrap_or(0)
    }

    pub fn scroll(&self, kind: ScrollKind) -> u32 {
        self.scrolls.get(&kind).copied().unwrap_or(0)
    }
}
