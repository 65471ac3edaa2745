//! Carried items as seen by the decision rules.
//!
//! Items are plain values: the policy reads their category, kind and bias,
//! and the inventory collaborator stores them. Three categories exist:
//! - [`EquipItem`]: occupies an [`EquipSlot`] and contributes a bias
//! - [`PotionItem`]: consumed by drinking
//! - [`ScrollItem`]: consumed by reading

mod equip;
mod potion;
mod scroll;

pub use equip::{EquipItem, EquipSlot};
pub use potion::{PotionItem, PotionKind};
pub use scroll::{ScrollItem, ScrollKind};

use core::fmt;

/// Opaque identifier of a carried or floor item.
///
/// Ordering is only used to make "first match" selection stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item:{:016x}", self.0)
    }
}

/// Broad item category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ItemCategory {
    Equipment,
    Potion,
    Scroll,
}

/// Any item that can sit in a bag.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CarryItem {
    Equipment(EquipItem),
    Potion(PotionItem),
    Scroll(ScrollItem),
}

impl CarryItem {
    pub fn id(&self) -> ItemId {
        match self {
            CarryItem::Equipment(item) => item.id,
            CarryItem::Potion(item) => item.id,
            CarryItem::Scroll(item) => item.id,
        }
    }

    pub fn category(&self) -> ItemCategory {
        match self {
            CarryItem::Equipment(_) => ItemCategory::Equipment,
            CarryItem::Potion(_) => ItemCategory::Potion,
            CarryItem::Scroll(_) => ItemCategory::Scroll,
        }
    }
}

impl From<EquipItem> for CarryItem {
    fn from(item: EquipItem) -> Self {
        CarryItem::Equipment(item)
    }
}

impl From<PotionItem> for CarryItem {
    fn from(item: PotionItem) -> Self {
        CarryItem::Potion(item)
    }
}

impl From<ScrollItem> for CarryItem {
    fn from(item: ScrollItem) -> Self {
        CarryItem::Scroll(item)
    }
}

/// Picks the entry whose cumulative weight covers `roll`.
///
/// `roll` is expected in `[0, total)`; anything past the end maps to the last
/// entry.
pub(crate) fn pick_by_rate<T: Copy>(table: &[(T, u32)], roll: u32) -> T {
    let mut acc = 0;
    for &(kind, rate) in table {
        acc += rate;
        if roll < acc {
            return kind;
        }
    }
    table[table.len() - 1].0
}

pub(crate) const fn total_rate<T: Copy>(table: &[(T, u32)]) -> u32 {
    let mut total = 0;
    let mut i = 0;
    while i < table.len() {
        total += table[i].1;
        i += 1;
    }
    total
}
