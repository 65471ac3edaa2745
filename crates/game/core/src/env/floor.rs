use core::fmt;

use crate::geometry::Position;

/// Opaque reference to a floor of the tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloorId(pub u32);

impl fmt::Display for FloorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "floor#{}", self.0)
    }
}

/// Read-only view of floor tiles needed by target selection.
pub trait FloorView: Send + Sync {
    /// Whether fighting is possible on the tile at `position`.
    fn can_battle(&self, position: Position) -> bool;

    /// The field object standing on `position`, if any.
    fn field_object_at(&self, position: Position) -> Option<FieldObjectKind>;
}

/// Interactive objects placed on floor tiles.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FieldObjectKind {
    Portal,
    /// Destroys an item handed to it.
    RecycleStation,
    Teleporter,
    Trap,
    Fountain,
    /// Shifts the alignment of whoever steps on it.
    AlterFaction,
}

impl FieldObjectKind {
    /// Whether items lying on this object's tile may be picked up.
    ///
    /// Objects that fire on contact (traps, teleporters, alignment shifters)
    /// make their tile off-limits for looting.
    pub const fn permits_pickup(self) -> bool {
        matches!(
            self,
            FieldObjectKind::Portal | FieldObjectKind::RecycleStation | FieldObjectKind::Fountain
        )
    }

    pub const fn is_recycle_station(self) -> bool {
        matches!(self, FieldObjectKind::RecycleStation)
    }
}
