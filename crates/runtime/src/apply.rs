//! Applying requests that only touch the actor's own bag.
//!
//! Equip changes, consumables and recycling can be resolved against a
//! [`Bag`] directly. Map and forget scrolls also update the reader's own
//! record of the current floor. Moves, attacks and pickups need the world and are left
//! to the caller.

use tower_core::{
    AchieveKind, ActOutcome, ActRequest, ActiveObject, Bag, CarryItem, Conditions, RejectReason,
    ScrollKind,
};

/// Resolves `request` if it is bag-local, recording the outcome on the actor.
///
/// Returns `None` (and records nothing) for world requests.
pub fn apply_bag_request<B>(
    actor: &mut ActiveObject<Bag, B>,
    request: ActRequest,
) -> Option<ActOutcome> {
    let outcome = match request {
        ActRequest::Attack { .. } | ActRequest::Move { .. } | ActRequest::Pickup { .. } => {
            return None;
        }
        ActRequest::Equip { item } => match actor.inventory_mut().equip(item) {
            Ok(_) => {
                actor.record_achievement(AchieveKind::Equip, 1.0);
                ActOutcome::Applied
            }
            Err(_) => ActOutcome::Rejected(RejectReason::ItemNotFound),
        },
        ActRequest::UnEquip { item } => match actor.inventory_mut().unequip(item) {
            Ok(()) => {
                actor.record_achievement(AchieveKind::UnEquip, 1.0);
                ActOutcome::Applied
            }
            Err(_) => ActOutcome::Rejected(RejectReason::ItemNotFound),
        },
        ActRequest::DrinkPotion { item } => match take_kind(actor, item, Kind::Potion) {
            Some(CarryItem::Potion(potion)) => {
                actor.record_potion_use(potion.kind);
                ActOutcome::Applied
            }
            _ => ActOutcome::Rejected(RejectReason::ItemNotFound),
        },
        ActRequest::ReadScroll { item } => match take_kind(actor, item, Kind::Scroll) {
            Some(CarryItem::Scroll(scroll)) => {
                match scroll.kind {
                    ScrollKind::FloorMap => {
                        actor.reveal_current_floor();
                    }
                    ScrollKind::Forget => {
                        actor.forget_current_floor();
                    }
                    ScrollKind::Teleport | ScrollKind::Identify | ScrollKind::Empty => {}
                }
                actor.record_scroll_use(scroll.kind);
                ActOutcome::Applied
            }
            _ => ActOutcome::Rejected(RejectReason::ItemNotFound),
        },
        ActRequest::Recycle { item } => {
            if actor.turn_data().conditions.contains(Conditions::FLOAT) {
                ActOutcome::Rejected(RejectReason::Floating)
            } else {
                match actor.inventory_mut().take(item) {
                    Ok(_) => {
                        actor.record_achievement(AchieveKind::Recycle, 1.0);
                        ActOutcome::Applied
                    }
                    Err(_) => ActOutcome::Rejected(RejectReason::ItemNotFound),
                }
            }
        }
    };

    actor.record_act_outcome(request, outcome);
    Some(outcome)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Kind {
    Potion,
    Scroll,
}

/// Takes `item` only if it is of the expected category; otherwise the bag is left as is.
fn take_kind<B>(
    actor: &mut ActiveObject<Bag, B>,
    item: tower_core::ItemId,
    kind: Kind,
) -> Option<CarryItem> {
    use tower_core::InventoryView;

    let bag = actor.inventory();
    let present = match kind {
        Kind::Potion => bag.potion_bag().iter().any(|p| p.id == item),
        Kind::Scroll => bag.scroll_bag().iter().any(|s| s.id == item),
    };
    if !present {
        return None;
    }
    actor.inventory_mut().take(item).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_core::{
        ActorRng, ConnectionId, FloorId, GameConfig, Inventory, InventoryView, ItemId, NoopPlanner,
        PotionItem, PotionKind, SpawnParams, TurnData,
    };

    fn actor() -> ActiveObject<Bag, ()> {
        let config = GameConfig {
            init_equip_count: 0,
            init_potion_count: 0,
            init_scroll_count: 0,
            ..GameConfig::default()
        };
        let params = SpawnParams {
            config: &config,
            home_floor: FloorId(0),
            inventory: Bag::new(),
            buffs: (),
            planner: Box::new(NoopPlanner),
            rng: ActorRng::seed_from(5),
        };
        ActiveObject::new_player(params, "tester", ConnectionId(1))
    }

    #[test]
    fn drinking_consumes_and_counts() {
        let mut a = actor();
        a.inventory_mut()
            .add_to_bag(PotionItem::new(ItemId(3), PotionKind::MinorHeal).into());

        let request = ActRequest::DrinkPotion { item: ItemId(3) };
        assert_eq!(apply_bag_request(&mut a, request), Some(ActOutcome::Applied));
        assert!(a.inventory().potion_bag().is_empty());
        assert_eq!(a.usage_stats().potion(PotionKind::MinorHeal), 1);
        assert_eq!(a.last_act().map(|r| r.outcome), Some(ActOutcome::Applied));
    }

    #[test]
    fn missing_item_is_rejected() {
        let mut a = actor();
        let request = ActRequest::ReadScroll { item: ItemId(8) };
        assert_eq!(
            apply_bag_request(&mut a, request),
            Some(ActOutcome::Rejected(RejectReason::ItemNotFound))
        );
    }

    #[test]
    fn potion_id_used_as_scroll_is_rejected_and_kept() {
        let mut a = actor();
        a.inventory_mut()
            .add_to_bag(PotionItem::new(ItemId(3), PotionKind::MinorHeal).into());

        let request = ActRequest::ReadScroll { item: ItemId(3) };
        assert_eq!(
            apply_bag_request(&mut a, request),
            Some(ActOutcome::Rejected(RejectReason::ItemNotFound))
        );
        assert_eq!(a.inventory().potion_bag().len(), 1);
    }

    #[test]
    fn floor_map_reveals_only_for_the_reader() {
        use tower_core::{MapDimensions, Position, ScrollItem};

        let mut a = actor();
        a.apply_turn_data(TurnData::new(10.0, 10.0, 1.0, 0));
        a.enter_floor(FloorId(2));
        a.record_sight(FloorId(2), MapDimensions::new(8, 8), Position::new(4, 4));
        a.inventory_mut()
            .add_to_bag(ScrollItem::new(ItemId(6), ScrollKind::FloorMap).into());
        assert!(a.exploration_rate(FloorId(2)) < 1.0);

        let request = ActRequest::ReadScroll { item: ItemId(6) };
        assert_eq!(apply_bag_request(&mut a, request), Some(ActOutcome::Applied));
        assert_eq!(a.exploration_rate(FloorId(2)), 1.0);
        assert_eq!(a.usage_stats().scroll(ScrollKind::FloorMap), 1);

        let mut other = actor();
        assert_eq!(other.exploration_rate(FloorId(2)), 0.0);
        other.enter_floor(FloorId(2));
        assert!(!other.reveal_current_floor());
    }

    #[test]
    fn floating_cannot_recycle() {
        let mut a = actor();
        a.inventory_mut()
            .add_to_bag(PotionItem::new(ItemId(3), PotionKind::Empty).into());
        a.apply_turn_data(TurnData::new(10.0, 10.0, 3.0, 0).with_conditions(Conditions::FLOAT));

        let request = ActRequest::Recycle { item: ItemId(3) };
        assert_eq!(
            apply_bag_request(&mut a, request),
            Some(ActOutcome::Rejected(RejectReason::Floating))
        );
    }

    #[test]
    fn world_requests_are_left_alone() {
        let mut a = actor();
        let request = ActRequest::Pickup { item: ItemId(1) };
        assert_eq!(apply_bag_request(&mut a, request), None);
        assert!(a.last_act().is_none());
    }
}
