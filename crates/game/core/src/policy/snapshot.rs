//! Read-only inputs of the decision rules.
//!
//! Both the authoritative driver and the assistive client build a
//! [`DecisionSnapshot`] from their own data and hand it to
//! [`decide`](super::decide). Everything here is borrowed, so building a
//! snapshot never copies bags or floor contents.

use crate::actor::{ActorId, Conditions};
use crate::bias::FactionBias;
use crate::env::FloorView;
use crate::geometry::{MapDimensions, Position};
use crate::item::{EquipItem, ItemId, PotionItem, ScrollItem};

/// Vital readings the potion rules look at.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VitalsView {
    pub hp: f64,
    pub hp_max: f64,
    pub sp: f64,
    pub sp_max: f64,
    pub sight: f64,
    /// Sight an actor of this level is expected to have.
    pub required_sight: f64,
}

/// The acting actor as seen by the policy.
///
/// Item slices are expected in ascending id order, which is what
/// [`Bag`](crate::env::Bag) produces; first-match rules rely on it.
#[derive(Clone, Copy, Debug)]
pub struct ActorView<'a> {
    pub id: ActorId,
    pub bias: FactionBias,
    pub vitals: VitalsView,
    pub conditions: Conditions,
    pub equipped: &'a [EquipItem],
    pub equip_bag: &'a [EquipItem],
    pub potion_bag: &'a [PotionItem],
    pub scroll_bag: &'a [ScrollItem],
}

impl ActorView<'_> {
    pub fn is_floating(&self) -> bool {
        self.conditions.contains(Conditions::FLOAT)
    }

    /// The worn item occupying the same slot as `item`.
    pub fn equipped_in_slot_of(&self, item: &EquipItem) -> Option<&EquipItem> {
        self.equipped.iter().find(|worn| worn.slot == item.slot)
    }
}

/// Another actor visible from the acting actor's position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NearbyActor {
    pub id: ActorId,
    pub position: Position,
    pub alive: bool,
}

/// An item lying on the floor near the acting actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NearbyItem {
    pub id: ItemId,
    pub position: Position,
}

/// What the acting actor sees around it this turn.
#[derive(Clone, Copy)]
pub struct Surroundings<'a> {
    pub position: Position,
    pub dims: MapDimensions,
    pub tower_bias: FactionBias,
    pub floor_bias: FactionBias,
    /// Fraction of the floor already explored, in `[0, 1]`.
    pub exploration_rate: f64,
    pub nearby_actors: &'a [NearbyActor],
    pub nearby_items: &'a [NearbyItem],
    pub floor: &'a dyn FloorView,
}

impl core::fmt::Debug for Surroundings<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Surroundings")
            .field("position", &self.position)
            .field("dims", &self.dims)
            .field("tower_bias", &self.tower_bias)
            .field("floor_bias", &self.floor_bias)
            .field("exploration_rate", &self.exploration_rate)
            .field("nearby_actors", &self.nearby_actors.len())
            .field("nearby_items", &self.nearby_items.len())
            .finish_non_exhaustive()
    }
}

impl Surroundings<'_> {
    /// Field object on the acting actor's own tile.
    pub fn standing_on(&self) -> Option<crate::env::FieldObjectKind> {
        self.floor.field_object_at(self.position)
    }
}

/// Everything [`decide`](super::decide) needs for one actor and one turn.
#[derive(Clone, Copy, Debug)]
pub struct DecisionSnapshot<'a> {
    pub actor: ActorView<'a>,
    pub surroundings: Surroundings<'a>,
}

impl<'a> DecisionSnapshot<'a> {
    pub fn new(actor: ActorView<'a>, surroundings: Surroundings<'a>) -> Self {
        Self {
            actor,
            surroundings,
        }
    }

    /// Tower + floor + actor alignment.
    pub fn environment_bias(&self) -> FactionBias {
        super::environment_bias(
            &self.surroundings.tower_bias,
            &self.surroundings.floor_bias,
            &self.actor.bias,
        )
    }
}
