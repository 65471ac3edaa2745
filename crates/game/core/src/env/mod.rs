//! Contracts for the collaborators an actor depends on.
//!
//! Inventory storage, the floor layout and the high-level planner live
//! outside this crate. The traits here describe the small surface the actor
//! state and the decision rules need from them, so servers and clients can
//! plug in their own implementations.
mod floor;
mod inventory;
mod planner;

pub use floor::{FieldObjectKind, FloorId, FloorView};
pub use inventory::{Bag, Inventory, InventoryError, InventoryView, TypeCount};
pub use planner::{ConnectionId, NoopPlanner, Planner};
