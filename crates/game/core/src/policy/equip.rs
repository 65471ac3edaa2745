//! Equipment rules driven by alignment.
//!
//! An item is worth wearing when adding its bias to the environment bias
//! makes the combined vector longer (in L1) than the current choice does, by
//! more than [`GameConfig::HYSTERESIS_MARGIN`]. The margin keeps an actor
//! from flip-flopping between two nearly equal items every turn.

use super::DecisionSnapshot;
use crate::actor::ActRequest;
use crate::bias::FactionBias;
use crate::config::GameConfig;
use crate::item::EquipItem;

/// Combined alignment pressure on an actor: tower + floor + own bias.
pub fn environment_bias(
    tower: &FactionBias,
    floor: &FactionBias,
    actor: &FactionBias,
) -> FactionBias {
    tower.add(floor).add(actor)
}

/// How strongly `candidate` reinforces `env`.
pub fn equip_score(env: &FactionBias, candidate: &FactionBias) -> f64 {
    env.add(candidate).abs_sum()
}

/// Whether `candidate` beats what is worn in its slot (`current`) by more
/// than the hysteresis margin.
///
/// An empty slot is scored as the bare environment.
pub fn should_equip(
    env: &FactionBias,
    current: Option<&FactionBias>,
    candidate: &FactionBias,
) -> bool {
    let baseline = match current {
        Some(current) => equip_score(env, current),
        None => env.abs_sum(),
    };
    equip_score(env, candidate) > baseline + GameConfig::HYSTERESIS_MARGIN
}

/// Whether wearing `item` weakens the environment by more than the margin.
pub fn should_unequip(env: &FactionBias, item: &FactionBias) -> bool {
    env.abs_sum() > equip_score(env, item) + GameConfig::HYSTERESIS_MARGIN
}

/// First worn item to take off, else first bag item to put on.
///
/// Worn items are checked in slot order and bag items in id order.
pub fn select_equip_change(snapshot: &DecisionSnapshot<'_>) -> Option<ActRequest> {
    let env = snapshot.environment_bias();
    let actor = &snapshot.actor;

    if let Some(item) = actor
        .equipped
        .iter()
        .find(|item| should_unequip(&env, &item.bias))
    {
        return Some(ActRequest::UnEquip { item: item.id });
    }

    actor
        .equip_bag
        .iter()
        .find(|candidate| {
            let current = actor.equipped_in_slot_of(candidate).map(|worn| &worn.bias);
            should_equip(&env, current, &candidate.bias)
        })
        .map(|item| ActRequest::Equip { item: item.id })
}

/// The equipment to get rid of first: lowest [`EquipItem::rank_cmp`].
///
/// `None` for an empty bag. The pick does not depend on the bag's order.
pub fn select_recycle_equip(bag: &[EquipItem]) -> Option<&EquipItem> {
    bag.iter().min_by(|a, b| a.rank_cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bias::{Bias, Faction};
    use crate::item::{EquipSlot, ItemId};

    fn bias(values: [f64; 6]) -> FactionBias {
        Bias::from_array(values)
    }

    fn item(id: u64, values: [f64; 6]) -> EquipItem {
        EquipItem::new(
            ItemId(id),
            format!("item {id}"),
            EquipSlot::Weapon,
            Faction::Crimson,
            bias(values),
        )
    }

    #[test]
    fn environment_bias_sums_all_three() {
        let env = environment_bias(
            &bias([1.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            &bias([0.0, 2.0, 0.0, 0.0, 0.0, 0.0]),
            &bias([1.0, -1.0, 3.0, 0.0, 0.0, 0.0]),
        );
        assert_eq!(env, bias([2.0, 1.0, 3.0, 0.0, 0.0, 0.0]));
    }

    #[test]
    fn margin_is_strict() {
        let env = bias([10.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let current = bias([1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);

        // 12 vs 11 + 1: not strictly greater
        assert!(!should_equip(&env, Some(&current), &bias([2.0, 0.0, 0.0, 0.0, 0.0, 0.0])));
        assert!(should_equip(&env, Some(&current), &bias([2.5, 0.0, 0.0, 0.0, 0.0, 0.0])));
        // same score never triggers a swap
        assert!(!should_equip(&env, Some(&current), &current));
    }

    #[test]
    fn empty_slot_uses_bare_environment() {
        let env = bias([3.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(!should_equip(&env, None, &bias([1.0, 0.0, 0.0, 0.0, 0.0, 0.0])));
        assert!(should_equip(&env, None, &bias([1.5, 0.0, 0.0, 0.0, 0.0, 0.0])));
    }

    #[test]
    fn unequip_when_item_fights_environment() {
        let env = bias([5.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(should_unequip(&env, &bias([-2.0, 0.0, 0.0, 0.0, 0.0, 0.0])));
        // 5 > 4 + 1 is false
        assert!(!should_unequip(&env, &bias([-1.0, 0.0, 0.0, 0.0, 0.0, 0.0])));
        assert!(!should_unequip(&env, &bias([2.0, 0.0, 0.0, 0.0, 0.0, 0.0])));
    }

    #[test]
    fn recycle_pick_ignores_order() {
        let items = vec![
            item(4, [3.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            item(2, [0.0, -1.0, 0.0, 0.0, 0.0, 0.0]),
            item(1, [0.5, 0.5, 0.0, 0.0, 0.0, 0.0]),
            item(3, [0.0, 0.0, 7.0, 0.0, 0.0, 0.0]),
        ];
        let mut reversed = items.clone();
        reversed.reverse();

        // ids 1 and 2 tie on strength; the lower id wins
        assert_eq!(select_recycle_equip(&items).map(|i| i.id), Some(ItemId(1)));
        assert_eq!(select_recycle_equip(&reversed).map(|i| i.id), Some(ItemId(1)));
        assert_eq!(select_recycle_equip(&[]), None);
    }
}
