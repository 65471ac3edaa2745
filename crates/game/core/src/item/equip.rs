use core::cmp::Ordering;

use super::ItemId;
use crate::bias::{Faction, FactionBias};
use crate::config::GameConfig;
use crate::rng::ActorRng;

/// Body slot an equipment item occupies. At most one item per slot is equipped.
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
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EquipSlot {
    Weapon,
    Shield,
    Helmet,
    Armor,
    Gauntlet,
    Footwear,
    Ring,
    Amulet,
}

impl EquipSlot {
    pub const ALL: [EquipSlot; 8] = [
        EquipSlot::Weapon,
        EquipSlot::Shield,
        EquipSlot::Helmet,
        EquipSlot::Armor,
        EquipSlot::Gauntlet,
        EquipSlot::Footwear,
        EquipSlot::Ring,
        EquipSlot::Amulet,
    ];
}

/// A piece of equipment and the alignment it contributes while worn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipItem {
    pub id: ItemId,
    pub name: String,
    pub slot: EquipSlot,
    pub faction: Faction,
    pub bias: FactionBias,
}

impl EquipItem {
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        slot: EquipSlot,
        faction: Faction,
        bias: FactionBias,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            slot,
            faction,
            bias,
        }
    }

    /// Creates a random item aligned with `faction`: random slot, bias on the
    /// faction's axis with a magnitude drawn from the configured range.
    pub fn random_of_faction(
        basename: &str,
        faction: Faction,
        rng: &mut ActorRng,
        config: &GameConfig,
    ) -> Self {
        let id = ItemId(rng.next_u64());
        let slot = EquipSlot::ALL[rng.below(EquipSlot::ALL.len() as u32) as usize];
        let magnitude = rng.range_f64(config.equip_bias_min, config.equip_bias_max);
        let bias = faction.base_bias().make_abs_sum_to(magnitude);
        Self::new(id, format!("{basename}'s {faction} {slot}"), slot, faction, bias)
    }

    /// Total alignment magnitude this item carries.
    pub fn strength(&self) -> f64 {
        self.bias.abs_sum()
    }

    /// Recycle ordering: weakest first, ties broken by id.
    ///
    /// The result does not depend on the order the items were listed in.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        self.strength()
            .total_cmp(&other.strength())
            .then_with(|| self.id.cmp(&other.id))
    }
}
