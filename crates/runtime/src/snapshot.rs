//! Read-only world data the driver builds decision snapshots from.
//!
//! A [`WorldSnapshot`] is taken once at the start of a turn. Actors are
//! mutated while it is alive, so it keeps its own copy of everything other
//! actors' decisions depend on (positions and liveness) instead of reading
//! them back from the actors.

use std::collections::BTreeMap;

use tower_core::geometry::wrapped_offset;
use tower_core::{
    ActorId, FactionBias, FieldObjectKind, FloorId, FloorView, ItemId, MapDimensions, NearbyActor,
    NearbyItem, Position, Surroundings,
};

/// Tiles, field objects and loot of one floor.
#[derive(Clone, Debug, PartialEq)]
pub struct FloorSnapshot {
    id: FloorId,
    bias: FactionBias,
    dims: MapDimensions,
    /// Row-major, one entry per tile.
    battle_mask: Vec<bool>,
    objects: BTreeMap<Position, FieldObjectKind>,
    items: BTreeMap<ItemId, Position>,
}

impl FloorSnapshot {
    /// An open floor: every tile battle-capable, no objects, no loot.
    pub fn new(id: FloorId, dims: MapDimensions) -> Self {
        Self {
            id,
            bias: FactionBias::zero(),
            dims,
            battle_mask: vec![true; dims.area()],
            objects: BTreeMap::new(),
            items: BTreeMap::new(),
        }
    }

    pub fn with_bias(mut self, bias: FactionBias) -> Self {
        self.bias = bias;
        self
    }

    pub fn id(&self) -> FloorId {
        self.id
    }

    pub fn bias(&self) -> FactionBias {
        self.bias
    }

    pub fn dims(&self) -> MapDimensions {
        self.dims
    }

    pub fn set_battle(&mut self, position: Position, allowed: bool) {
        let index = self.tile_index(position);
        self.battle_mask[index] = allowed;
    }

    pub fn place_object(&mut self, position: Position, kind: FieldObjectKind) {
        self.objects.insert(self.dims.wrap(position), kind);
    }

    pub fn drop_item(&mut self, item: ItemId, position: Position) {
        self.items.insert(item, self.dims.wrap(position));
    }

    /// Removes loot from the floor; `None` if it is not lying here.
    pub fn remove_item(&mut self, item: ItemId) -> Option<Position> {
        self.items.remove(&item)
    }

    /// Loot in ascending id order.
    pub fn items(&self) -> impl Iterator<Item = (ItemId, Position)> + '_ {
        self.items.iter().map(|(id, position)| (*id, *position))
    }

    /// Loot within `radius` tiles (Chebyshev, wrapped) of `center`.
    pub fn items_near(&self, center: Position, radius: u32) -> Vec<NearbyItem> {
        self.items()
            .filter(|(_, position)| within(center, *position, radius, self.dims))
            .map(|(id, position)| NearbyItem { id, position })
            .collect()
    }

    fn tile_index(&self, position: Position) -> usize {
        let wrapped = self.dims.wrap(position);
        wrapped.y as usize * self.dims.width as usize + wrapped.x as usize
    }
}

impl FloorView for FloorSnapshot {
    fn can_battle(&self, position: Position) -> bool {
        self.battle_mask
            .get(self.tile_index(position))
            .copied()
            .unwrap_or(false)
    }

    fn field_object_at(&self, position: Position) -> Option<FieldObjectKind> {
        self.objects.get(&self.dims.wrap(position)).copied()
    }
}

/// Where an actor stood when the turn started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActorSighting {
    pub id: ActorId,
    pub floor: FloorId,
    pub position: Position,
    pub alive: bool,
}

/// Tower-wide state captured at turn start.
#[derive(Clone, Debug, Default)]
pub struct WorldSnapshot {
    tower_bias: FactionBias,
    floors: BTreeMap<FloorId, FloorSnapshot>,
    sightings: BTreeMap<ActorId, ActorSighting>,
}

impl WorldSnapshot {
    pub fn new(tower_bias: FactionBias) -> Self {
        Self {
            tower_bias,
            floors: BTreeMap::new(),
            sightings: BTreeMap::new(),
        }
    }

    pub fn tower_bias(&self) -> FactionBias {
        self.tower_bias
    }

    pub fn add_floor(&mut self, floor: FloorSnapshot) {
        self.floors.insert(floor.id(), floor);
    }

    pub fn floor(&self, id: FloorId) -> Option<&FloorSnapshot> {
        self.floors.get(&id)
    }

    pub fn floor_mut(&mut self, id: FloorId) -> Option<&mut FloorSnapshot> {
        self.floors.get_mut(&id)
    }

    pub fn floors(&self) -> impl Iterator<Item = &FloorSnapshot> {
        self.floors.values()
    }

    /// Records (or replaces) where an actor is.
    pub fn record_sighting(&mut self, sighting: ActorSighting) {
        self.sightings.insert(sighting.id, sighting);
    }

    pub fn forget_actor(&mut self, id: ActorId) {
        self.sightings.remove(&id);
    }

    pub fn sighting(&self, id: ActorId) -> Option<&ActorSighting> {
        self.sightings.get(&id)
    }

    /// Sightings in ascending actor id order.
    pub fn sightings(&self) -> impl Iterator<Item = &ActorSighting> {
        self.sightings.values()
    }

    /// Everything `id` can see this turn, or `None` if it is not on a known floor.
    pub fn perceive(&self, id: ActorId, sight: f64) -> Option<Perception<'_>> {
        let me = self.sightings.get(&id)?;
        let floor = self.floors.get(&me.floor)?;
        let radius = sight.max(1.0) as u32;

        let actors = self
            .sightings
            .values()
            .filter(|other| other.floor == me.floor && other.id != id)
            .filter(|other| within(me.position, other.position, radius, floor.dims()))
            .map(|other| NearbyActor {
                id: other.id,
                position: other.position,
                alive: other.alive,
            })
            .collect();

        Some(Perception {
            tower_bias: self.tower_bias,
            floor,
            position: me.position,
            actors,
            items: floor.items_near(me.position, radius),
        })
    }
}

/// Owned neighbour lists backing one actor's [`Surroundings`].
#[derive(Debug)]
pub struct Perception<'w> {
    tower_bias: FactionBias,
    floor: &'w FloorSnapshot,
    position: Position,
    actors: Vec<NearbyActor>,
    items: Vec<NearbyItem>,
}

impl Perception<'_> {
    pub fn floor(&self) -> &FloorSnapshot {
        self.floor
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Neighbourhood for a decision; `exploration_rate` is the deciding
    /// actor's own progress on this floor.
    pub fn surroundings(&self, exploration_rate: f64) -> Surroundings<'_> {
        Surroundings {
            position: self.position,
            dims: self.floor.dims(),
            tower_bias: self.tower_bias,
            floor_bias: self.floor.bias(),
            exploration_rate: exploration_rate.clamp(0.0, 1.0),
            nearby_actors: &self.actors,
            nearby_items: &self.items,
            floor: self.floor,
        }
    }
}

fn within(center: Position, other: Position, radius: u32, dims: MapDimensions) -> bool {
    let (dx, dy) = wrapped_offset(center, other, dims);
    dx.unsigned_abs().max(dy.unsigned_abs()) <= u64::from(radius)
}
