//! Neighbour selection for attacks and loot.
//!
//! Candidates are matched in ascending id order regardless of how the caller
//! listed them, so two callers with the same world data pick the same target.

use super::{NearbyActor, NearbyItem};
use crate::actor::{ActRequest, ActorId};
use crate::env::FloorView;
use crate::geometry::{MapDimensions, Position, Way9, contact_direction};

/// Lowest-id living neighbour worth attacking, with the direction to strike.
///
/// Nothing is selected when the actor's own tile does not allow fighting.
/// A candidate qualifies when it is alive, is not the actor itself, stands on
/// a battle-capable tile and touches the actor (sharing the tile does not
/// count).
pub fn select_combat_target(
    position: Position,
    self_id: ActorId,
    candidates: &[NearbyActor],
    floor: &dyn FloorView,
    dims: MapDimensions,
) -> Option<(ActorId, Way9)> {
    if !floor.can_battle(position) {
        return None;
    }

    candidates
        .iter()
        .filter(|other| other.alive && other.id != self_id)
        .filter(|other| floor.can_battle(other.position))
        .filter_map(|other| match contact_direction(position, other.position, dims) {
            (true, dir) if dir != Way9::Center => Some((other.id, dir)),
            _ => None,
        })
        .min_by_key(|(id, _)| *id)
}

/// Lowest-id reachable item: picked up when underfoot, stepped towards when adjacent.
///
/// Items on tiles whose field object forbids looting are skipped.
pub fn select_pickup_target(
    position: Position,
    items: &[NearbyItem],
    floor: &dyn FloorView,
    dims: MapDimensions,
) -> Option<ActRequest> {
    items
        .iter()
        .filter(|item| {
            floor
                .field_object_at(item.position)
                .is_none_or(|object| object.permits_pickup())
        })
        .filter_map(|item| match contact_direction(position, item.position, dims) {
            (true, dir) => Some((item.id, dir)),
            (false, _) => None,
        })
        .min_by_key(|(id, _)| *id)
        .map(|(item, dir)| match dir {
            Way9::Center => ActRequest::Pickup { item },
            dir => ActRequest::Move { dir },
        })
}
