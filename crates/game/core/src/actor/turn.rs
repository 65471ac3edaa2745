//! Turn-scoped records: the request an actor wants applied this turn, what
//! happened to the last one, and the results log shown to the player.

use super::ActorId;
use crate::geometry::Way9;
use crate::item::ItemId;

/// A request the driver applies on the actor's behalf.
///
/// At most one request is pending per actor per turn. The driver matches on
/// the variant to pick the external action (network send or world mutation).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActRequest {
    Attack { dir: Way9 },
    Move { dir: Way9 },
    Pickup { item: ItemId },
    Equip { item: ItemId },
    UnEquip { item: ItemId },
    DrinkPotion { item: ItemId },
    ReadScroll { item: ItemId },
    Recycle { item: ItemId },
}

impl ActRequest {
    /// Item the request refers to, if any.
    pub const fn item(&self) -> Option<ItemId> {
        match *self {
            ActRequest::Attack { .. } | ActRequest::Move { .. } => None,
            ActRequest::Pickup { item }
            | ActRequest::Equip { item }
            | ActRequest::UnEquip { item }
            | ActRequest::DrinkPotion { item }
            | ActRequest::ReadScroll { item }
            | ActRequest::Recycle { item } => Some(item),
        }
    }
}

/// How the driver's attempt to apply a request went.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActOutcome {
    Applied,
    Rejected(RejectReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum RejectReason {
    ItemNotFound,
    TargetGone,
    Blocked,
    NotEnoughSp,
    Floating,
}

/// A request together with its outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActRecord {
    pub request: ActRequest,
    pub outcome: ActOutcome,
}

/// Entry in an actor's per-turn result log.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnResult {
    AttackTo { target: ActorId, damage: f64 },
    AttackedFrom { attacker: ActorId, damage: f64 },
    Kill { target: ActorId },
    KilledBy { attacker: ActorId },
    DamagedByTile { damage: f64 },
    Rebirth,
}
