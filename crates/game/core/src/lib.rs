//! Deterministic actor rules shared by the tower server and its clients.
//!
//! `tower-core` defines the alignment model ([`bias`]), wrapped floor geometry
//! ([`geometry`]), the carried item model ([`item`]), per-actor state and its
//! lifecycle ([`actor`]) and the stateless decision rules ([`policy`]). It does
//! no I/O: inventory storage, floors and planners are reached through the
//! contracts in [`env`], and every random roll comes from the actor's own
//! [`ActorRng`].
pub mod actor;
pub mod bias;
pub mod config;
pub mod env;
pub mod error;
pub mod geometry;
pub mod item;
pub mod policy;
pub mod rng;

pub use actor::{
    AchieveKind, AchieveStats, ActOutcome, ActRecord, ActRequest, ActiveObject, ActorId,
    ActorKind, Chat, Conditions, FALLBACK_NICKNAME, FloorVisits, LifecycleOp, LifecycleState,
    RejectReason, SpawnParams, TurnData, TurnResult, UsageStats, VisitArea,
};
pub use bias::{Bias, FACTION_COUNT, Faction, FactionBias};
pub use config::GameConfig;
pub use env::{
    Bag, ConnectionId, FieldObjectKind, FloorId, FloorView, Inventory, InventoryError,
    InventoryView, NoopPlanner, Planner, TypeCount,
};
pub use error::{ConfigError, ErrorSeverity, GameError, LifecycleError};
pub use geometry::{MapDimensions, Position, Way9, contact_direction, wrapped_offset};
pub use item::{
    CarryItem, EquipItem, EquipSlot, ItemCategory, ItemId, PotionItem, PotionKind, ScrollItem,
    ScrollKind,
};
pub use policy::{
    ActorView, AutoActs, DecisionSnapshot, NearbyActor, NearbyItem, Surroundings, VitalsView,
    decide,
};
pub use rng::ActorRng;
