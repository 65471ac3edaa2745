use core::fmt;

/// Handle of the high-level AI planner driving an actor between turns.
pub trait Planner: Send {
    /// Forgets the current goal sequence; called when the actor is reborn.
    fn reset_plan(&mut self);

    /// Releases planner resources; the planner is dropped right after.
    fn cleanup(&mut self);
}

/// Planner that does nothing, for actors driven purely by the decision policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopPlanner;

impl Planner for NoopPlanner {
    fn reset_plan(&mut self) {}

    fn cleanup(&mut self) {}
}

/// Opaque token for a client network connection attached to an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn#{}", self.0)
    }
}
