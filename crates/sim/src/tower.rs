//! A generated single-floor tower and the world-side half of request
//! application: moves, pickups and attacks.

use std::collections::HashMap;

use tower_core::{
    AchieveKind, ActOutcome, ActRequest, ActiveObject, ActorId, ActorRng, Bag, CarryItem, Faction,
    FieldObjectKind, FloorId, Inventory, ItemId, MapDimensions, PotionItem, PotionKind, Position,
    RejectReason, ScrollItem, ScrollKind, TurnResult,
};
use tower_runtime::{ActorSighting, FloorSnapshot, WorldSnapshot};

pub const FLOOR: FloorId = FloorId(1);

const WIDTH: u32 = 16;
const HEIGHT: u32 = 16;
const LOOSE_ITEMS: usize = 12;
const ATTACK_DAMAGE: f64 = 15.0;

pub struct Tower {
    world: WorldSnapshot,
    /// Items lying on the floor, by id.
    loose: HashMap<ItemId, CarryItem>,
}

impl Tower {
    pub fn generate(rng: &mut ActorRng) -> Self {
        let dims = MapDimensions::new(WIDTH, HEIGHT);
        let floor_faction = Faction::ALL[rng.below(Faction::ALL.len() as u32) as usize];
        let tower_faction = Faction::ALL[rng.below(Faction::ALL.len() as u32) as usize];

        let mut floor = FloorSnapshot::new(FLOOR, dims).with_bias(floor_faction.base_bias());
        floor.place_object(Position::new(8, 8), FieldObjectKind::RecycleStation);
        floor.place_object(Position::new(3, 12), FieldObjectKind::Trap);
        floor.set_battle(Position::new(8, 8), false);

        let mut loose = HashMap::new();
        for _ in 0..LOOSE_ITEMS {
            let id = ItemId(rng.next_u64());
            let item: CarryItem = if rng.below(2) == 0 {
                let kind = PotionKind::from_make_roll(rng.below(PotionKind::TOTAL_MAKE_RATE));
                PotionItem::new(id, kind).into()
            } else {
                let kind = ScrollKind::from_make_roll(rng.below(ScrollKind::TOTAL_MAKE_RATE));
                ScrollItem::new(id, kind).into()
            };
            floor.drop_item(id, random_position(rng, dims));
            loose.insert(id, item);
        }

        let mut world = WorldSnapshot::new(tower_faction.base_bias().scale(0.5));
        world.add_floor(floor);
        tracing::info!(%floor_faction, %tower_faction, items = loose.len(), "tower generated");

        Self { world, loose }
    }

    pub fn snapshot(&self) -> &WorldSnapshot {
        &self.world
    }

    /// Puts `actor` on a random tile of the floor.
    pub fn place<B>(&mut self, actor: &mut ActiveObject<Bag, B>, rng: &mut ActorRng) {
        let dims = MapDimensions::new(WIDTH, HEIGHT);
        actor.enter_floor(FLOOR);
        self.world.record_sighting(ActorSighting {
            id: actor.id(),
            floor: FLOOR,
            position: random_position(rng, dims),
            alive: actor.is_alive(),
        });
    }

    /// Refreshes the alive flags of every sighting before a turn.
    pub fn sync_vitals<B>(&mut self, actors: &[ActiveObject<Bag, B>]) {
        for actor in actors {
            if let Some(&sighting) = self.world.sighting(actor.id()) {
                self.world.record_sighting(ActorSighting {
                    alive: actor.is_alive(),
                    ..sighting
                });
            }
        }
    }

    /// Applies a request that needs the world and records its outcome.
    pub fn apply_world_request<B>(
        &mut self,
        actors: &mut [ActiveObject<Bag, B>],
        index: usize,
        request: ActRequest,
    ) -> ActOutcome {
        let id = actors[index].id();
        let outcome = match request {
            ActRequest::Move { dir } => match self.world.sighting(id).copied() {
                Some(sighting) => {
                    let position = sighting.position.step(dir, self.dims());
                    self.world.record_sighting(ActorSighting {
                        position,
                        ..sighting
                    });
                    ActOutcome::Applied
                }
                None => ActOutcome::Rejected(RejectReason::Blocked),
            },
            ActRequest::Pickup { item } => self.pickup(&mut actors[index], item),
            ActRequest::Attack { dir } => {
                let target = self.world.sighting(id).and_then(|me| {
                    let spot = me.position.step(dir, self.dims());
                    self.world
                        .sightings()
                        .find(|other| {
                            other.floor == me.floor && other.position == spot && other.id != id
                        })
                        .map(|other| other.id)
                });
                match target.and_then(|target| actors.iter().position(|a| a.id() == target)) {
                    Some(target) if actors[target].is_alive() => {
                        strike(actors, index, target);
                        ActOutcome::Applied
                    }
                    _ => ActOutcome::Rejected(RejectReason::TargetGone),
                }
            }
            ActRequest::Equip { .. }
            | ActRequest::UnEquip { .. }
            | ActRequest::DrinkPotion { .. }
            | ActRequest::ReadScroll { .. }
            | ActRequest::Recycle { .. } => ActOutcome::Rejected(RejectReason::Blocked),
        };

        actors[index].record_act_outcome(request, outcome);
        outcome
    }

    fn pickup<B>(&mut self, actor: &mut ActiveObject<Bag, B>, item: ItemId) -> ActOutcome {
        let Some(floor) = self.world.floor_mut(FLOOR) else {
            return ActOutcome::Rejected(RejectReason::ItemNotFound);
        };
        if floor.remove_item(item).is_none() {
            return ActOutcome::Rejected(RejectReason::ItemNotFound);
        }
        match self.loose.remove(&item) {
            Some(carry) => {
                actor.inventory_mut().add_to_bag(carry);
                actor.record_achievement(AchieveKind::Pickup, 1.0);
                ActOutcome::Applied
            }
            None => ActOutcome::Rejected(RejectReason::ItemNotFound),
        }
    }

    fn dims(&self) -> MapDimensions {
        MapDimensions::new(WIDTH, HEIGHT)
    }
}

fn strike<B>(actors: &mut [ActiveObject<Bag, B>], attacker: usize, target: usize) {
    let attacker_id: ActorId = actors[attacker].id();
    let target_id: ActorId = actors[target].id();

    actors[target].add_hp(-ATTACK_DAMAGE);
    actors[attacker].push_turn_result(TurnResult::AttackTo {
        target: target_id,
        damage: ATTACK_DAMAGE,
    });
    actors[target].push_turn_result(TurnResult::AttackedFrom {
        attacker: attacker_id,
        damage: ATTACK_DAMAGE,
    });

    if !actors[target].is_alive() {
        actors[attacker].push_turn_result(TurnResult::Kill { target: target_id });
        actors[attacker].record_achievement(AchieveKind::Kill, 1.0);
        actors[target].push_turn_result(TurnResult::KilledBy {
            attacker: attacker_id,
        });
        actors[target].record_achievement(AchieveKind::Death, 1.0);
        tracing::info!(attacker = %attacker_id, target = %target_id, "kill");
    }
}

fn random_position(rng: &mut ActorRng, dims: MapDimensions) -> Position {
    Position::new(rng.below(dims.width) as i32, rng.below(dims.height) as i32)
}
