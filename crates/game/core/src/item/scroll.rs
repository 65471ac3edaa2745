use super::{ItemId, pick_by_rate, total_rate};

/// Scroll kinds.
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
pub enum ScrollKind {
    /// Reveals the current floor's layout.
    FloorMap,
    /// Moves the reader to a random tile.
    Teleport,
    Identify,
    Empty,
    /// Wipes the reader's floor knowledge.
    Forget,
}

impl ScrollKind {
    const MAKE_RATES: [(ScrollKind, u32); 5] = [
        (ScrollKind::FloorMap, 30),
        (ScrollKind::Teleport, 20),
        (ScrollKind::Identify, 20),
        (ScrollKind::Empty, 10),
        (ScrollKind::Forget, 5),
    ];

    pub const TOTAL_MAKE_RATE: u32 = total_rate(&Self::MAKE_RATES);

    pub fn from_make_roll(roll: u32) -> Self {
        pick_by_rate(&Self::MAKE_RATES, roll)
    }

    /// Whether the AI should get rid of this scroll at a recycle station.
    pub const fn ai_recyclable(self) -> bool {
        matches!(self, ScrollKind::Empty | ScrollKind::Forget)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollItem {
    pub id: ItemId,
    pub kind: ScrollKind,
}

impl ScrollItem {
    pub const fn new(id: ItemId, kind: ScrollKind) -> Self {
        Self { id, kind }
    }
}
