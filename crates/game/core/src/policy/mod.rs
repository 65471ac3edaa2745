//! Stateless decision rules shared by the server driver and the client assist loop.
//!
//! # Pipeline
//!
//! [`decide`] runs the rules in a fixed order and returns the first request
//! any of them produces:
//!
//! 1. battle: attack an adjacent living actor ([`select_combat_target`])
//! 2. pickup: loot underfoot or step towards adjacent loot ([`select_pickup_target`])
//! 3. equip: take off or put on gear by alignment ([`select_equip_change`])
//! 4. consume: drink a potion or read a scroll ([`select_consumable`])
//! 5. recycle: junk potions and scrolls, then the weakest gear ([`select_recycle`])
//!
//! Each stage can be switched off through [`AutoActs`]. Pickup and recycling
//! are skipped while the actor floats.
//!
//! # Determinism
//!
//! Every function here is pure. First-match rules walk candidates in
//! ascending id order, so identical snapshots always yield identical requests
//! on every caller.

mod consumable;
mod equip;
mod snapshot;
mod target;

pub use consumable::{
    select_consumable, select_recycle, should_drink_potion, should_read_scroll,
    should_recycle_potion, should_recycle_scroll,
};
pub use equip::{
    environment_bias, equip_score, select_equip_change, select_recycle_equip, should_equip,
    should_unequip,
};
pub use snapshot::{ActorView, DecisionSnapshot, NearbyActor, NearbyItem, Surroundings, VitalsView};
pub use target::{select_combat_target, select_pickup_target};

use bitflags::bitflags;

use crate::actor::ActRequest;

bitflags! {
    /// Pipeline stages an actor is allowed to run automatically.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct AutoActs: u8 {
        const BATTLE                = 1 << 0;
        const PICKUP                = 1 << 1;
        const EQUIP                 = 1 << 2;
        const USE_POTION_SCROLL     = 1 << 3;
        const RECYCLE_POTION_SCROLL = 1 << 4;
        const RECYCLE_EQUIP         = 1 << 5;
    }
}

impl Default for AutoActs {
    fn default() -> Self {
        Self::all()
    }
}

/// Picks at most one request for this turn.
///
/// Returns `None` when no enabled stage finds anything to do.
pub fn decide(snapshot: &DecisionSnapshot<'_>, acts: AutoActs) -> Option<ActRequest> {
    let actor = &snapshot.actor;
    let around = &snapshot.surroundings;

    if acts.contains(AutoActs::BATTLE)
        && let Some((_, dir)) = select_combat_target(
            around.position,
            actor.id,
            around.nearby_actors,
            around.floor,
            around.dims,
        )
    {
        return Some(ActRequest::Attack { dir });
    }

    if acts.contains(AutoActs::PICKUP)
        && !actor.is_floating()
        && let Some(request) =
            select_pickup_target(around.position, around.nearby_items, around.floor, around.dims)
    {
        return Some(request);
    }

    if acts.contains(AutoActs::EQUIP)
        && let Some(request) = select_equip_change(snapshot)
    {
        return Some(request);
    }

    if acts.contains(AutoActs::USE_POTION_SCROLL)
        && let Some(request) = select_consumable(snapshot)
    {
        return Some(request);
    }

    select_recycle(snapshot, acts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{ActorId, Conditions};
    use crate::bias::{Bias, Faction, FactionBias};
    use crate::env::{FieldObjectKind, FloorView};
    use crate::geometry::{MapDimensions, Position, Way9};
    use crate::item::{
        EquipItem, EquipSlot, ItemId, PotionItem, PotionKind, ScrollItem, ScrollKind,
    };

    struct FlatFloor {
        object: Option<FieldObjectKind>,
    }

    impl FloorView for FlatFloor {
        fn can_battle(&self, _position: Position) -> bool {
            true
        }

        fn field_object_at(&self, _position: Position) -> Option<FieldObjectKind> {
            self.object
        }
    }

    fn full_vitals() -> VitalsView {
        VitalsView {
            hp: 100.0,
            hp_max: 100.0,
            sp: 100.0,
            sp_max: 100.0,
            sight: 10.0,
            required_sight: 4.0,
        }
    }

    fn bias(values: [f64; 6]) -> FactionBias {
        Bias::from_array(values)
    }

    fn equip(id: u64, values: [f64; 6]) -> EquipItem {
        EquipItem::new(
            ItemId(id),
            format!("item {id}"),
            EquipSlot::Armor,
            Faction::Crimson,
            bias(values),
        )
    }

    struct Fixture {
        equipped: Vec<EquipItem>,
        bag: Vec<EquipItem>,
        potions: Vec<PotionItem>,
        scrolls: Vec<ScrollItem>,
        actors: Vec<NearbyActor>,
        items: Vec<NearbyItem>,
        floor: FlatFloor,
        vitals: VitalsView,
        conditions: Conditions,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                equipped: Vec::new(),
                bag: Vec::new(),
                potions: Vec::new(),
                scrolls: Vec::new(),
                actors: Vec::new(),
                items: Vec::new(),
                floor: FlatFloor { object: None },
                vitals: full_vitals(),
                conditions: Conditions::empty(),
            }
        }

        fn snapshot(&self) -> DecisionSnapshot<'_> {
            DecisionSnapshot::new(
                ActorView {
                    id: ActorId(1),
                    bias: bias([3.0, -3.0, 0.0, 0.0, 0.0, 0.0]),
                    vitals: self.vitals,
                    conditions: self.conditions,
                    equipped: &self.equipped,
                    equip_bag: &self.bag,
                    potion_bag: &self.potions,
                    scroll_bag: &self.scrolls,
                },
                Surroundings {
                    position: Position::new(2, 2),
                    dims: MapDimensions::new(8, 8),
                    tower_bias: FactionBias::zero(),
                    floor_bias: FactionBias::zero(),
                    exploration_rate: 1.0,
                    nearby_actors: &self.actors,
                    nearby_items: &self.items,
                    floor: &self.floor,
                },
            )
        }
    }

    #[test]
    fn equips_aligned_item_over_opposed_one() {
        let mut f = Fixture::new();
        f.equipped.push(equip(10, [1.0, -1.0, 0.0, 0.0, 0.0, 0.0]));
        f.bag.push(equip(11, [5.0, -5.0, 0.0, 0.0, 0.0, 0.0]));

        // |[8,-8]| = 16 > |[4,-4]| + 1 = 9
        assert_eq!(
            decide(&f.snapshot(), AutoActs::default()),
            Some(ActRequest::Equip { item: ItemId(11) })
        );
    }

    #[test]
    fn nothing_to_do_yields_none() {
        let f = Fixture::new();
        assert_eq!(decide(&f.snapshot(), AutoActs::default()), None);
    }

    #[test]
    fn battle_comes_first() {
        let mut f = Fixture::new();
        f.bag.push(equip(11, [5.0, -5.0, 0.0, 0.0, 0.0, 0.0]));
        f.items.push(NearbyItem {
            id: ItemId(3),
            position: Position::new(2, 2),
        });
        f.actors.push(NearbyActor {
            id: ActorId(2),
            position: Position::new(1, 2),
            alive: true,
        });

        assert_eq!(
            decide(&f.snapshot(), AutoActs::default()),
            Some(ActRequest::Attack { dir: Way9::West })
        );
        assert_eq!(
            decide(&f.snapshot(), AutoActs::default() - AutoActs::BATTLE),
            Some(ActRequest::Pickup { item: ItemId(3) })
        );
        assert_eq!(
            decide(
                &f.snapshot(),
                AutoActs::default() - AutoActs::BATTLE - AutoActs::PICKUP
            ),
            Some(ActRequest::Equip { item: ItemId(11) })
        );
    }

    #[test]
    fn floating_blocks_pickup_and_recycle() {
        let mut f = Fixture::new();
        f.floor.object = Some(FieldObjectKind::RecycleStation);
        f.items.push(NearbyItem {
            id: ItemId(3),
            position: Position::new(2, 2),
        });
        f.potions.push(PotionItem::new(ItemId(4), PotionKind::Empty));
        f.conditions = Conditions::FLOAT;

        assert_eq!(decide(&f.snapshot(), AutoActs::default()), None);

        f.conditions = Conditions::empty();
        assert_eq!(
            decide(&f.snapshot(), AutoActs::default()),
            Some(ActRequest::Pickup { item: ItemId(3) })
        );
    }

    #[test]
    fn potion_before_scroll() {
        let mut f = Fixture::new();
        f.vitals.hp = 50.0;
        f.potions.push(PotionItem::new(ItemId(7), PotionKind::MinorHealing));
        f.scrolls.push(ScrollItem::new(ItemId(2), ScrollKind::FloorMap));

        let mut snapshot = f.snapshot();
        snapshot.surroundings.exploration_rate = 0.5;
        assert_eq!(
            decide(&snapshot, AutoActs::default()),
            Some(ActRequest::DrinkPotion { item: ItemId(7) })
        );

        f.vitals.hp = 100.0;
        let mut snapshot = f.snapshot();
        snapshot.surroundings.exploration_rate = 0.5;
        assert_eq!(
            decide(&snapshot, AutoActs::default()),
            Some(ActRequest::ReadScroll { item: ItemId(2) })
        );
    }

    #[test]
    fn recycle_order_on_station() {
        let mut f = Fixture::new();
        f.floor.object = Some(FieldObjectKind::RecycleStation);
        f.bag.push(equip(30, [0.5, 0.0, 0.0, 0.0, 0.0, 0.0]));
        f.scrolls.push(ScrollItem::new(ItemId(20), ScrollKind::Forget));
        f.potions.push(PotionItem::new(ItemId(10), PotionKind::Nausea));

        let acts = AutoActs::RECYCLE_POTION_SCROLL | AutoActs::RECYCLE_EQUIP;
        assert_eq!(
            decide(&f.snapshot(), acts),
            Some(ActRequest::Recycle { item: ItemId(10) })
        );
        f.potions.clear();
        assert_eq!(
            decide(&f.snapshot(), acts),
            Some(ActRequest::Recycle { item: ItemId(20) })
        );
        f.scrolls.clear();
        assert_eq!(
            decide(&f.snapshot(), acts),
            Some(ActRequest::Recycle { item: ItemId(30) })
        );
        assert_eq!(decide(&f.snapshot(), AutoActs::RECYCLE_POTION_SCROLL), None);

        f.floor.object = None;
        assert_eq!(decide(&f.snapshot(), acts), None);
    }

    #[test]
    fn default_enables_every_stage() {
        assert_eq!(AutoActs::default(), AutoActs::all());
    }
}
