//! Active objects: the actors climbing the tower.
//!
//! An [`ActiveObject`] bundles an actor's identity, alignment, vitals,
//! counters and turn-scoped bookkeeping with handles to its external
//! collaborators (inventory, buff manager, planner, client connection).
//!
//! # Ownership
//!
//! Every mutator takes `&mut self`. The turn driver owns the actor for the
//! duration of a turn, so no two invocations can mutate the same actor at
//! once; other actors are only ever seen through read-only snapshots.
mod lifecycle;
mod stats;
mod turn;
mod visit;
mod vitals;

pub use lifecycle::{FALLBACK_NICKNAME, LifecycleOp, LifecycleState, SpawnParams};
pub use stats::{AchieveKind, AchieveStats, UsageStats};
pub use turn::{ActOutcome, ActRecord, ActRequest, RejectReason, TurnResult};
pub use visit::{FloorVisits, VisitArea};
pub use vitals::{Conditions, TurnData};

use core::fmt;

use crate::bias::{Faction, FactionBias};
use crate::config::GameConfig;
use crate::env::{ConnectionId, FloorId, InventoryView, Planner};
use crate::geometry::{MapDimensions, Position};
use crate::item::{PotionKind, ScrollKind};
use crate::policy::{ActorView, VitalsView};
use crate::rng::ActorRng;
use vitals::clamp_vital;

/// Opaque actor identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ao:{:016x}", self.0)
    }
}

/// Who controls the actor. Fixed at construction.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActorKind {
    /// Driven by a connected client (optionally with server AI assistance).
    Player,
    /// Driven entirely by the decision policy and planner.
    Autonomous,
}

/// Last chat line an actor said.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chat {
    pub text: String,
    pub turn: u64,
}

/// An actor and all of its mutable state.
///
/// `I` is the inventory collaborator, `B` the buff manager (held but never
/// inspected here).
pub struct ActiveObject<I, B> {
    rng: ActorRng,

    id: ActorId,
    nickname: String,
    kind: ActorKind,
    born_faction: Faction,
    home_floor: FloorId,
    current_floor: Option<FloorId>,

    state: LifecycleState,
    connection: Option<ConnectionId>,
    planner: Option<Box<dyn Planner>>,
    ai_in_use: bool,

    achieve: AchieveStats,
    usage: UsageStats,

    remain_turns_to_rebirth: u32,
    remain_turns_to_act: f64,
    chat: Option<Chat>,

    // battle
    battle_exp: f64,
    bias: FactionBias,
    hp: f64,
    sp: f64,
    inventory: I,
    buffs: B,

    // valid in a turn
    turn_data: TurnData,
    needs_notification: bool,
    turn_results: Vec<TurnResult>,
    pending: Option<ActRequest>,
    last_act: Option<ActRecord>,

    // exploration
    visits: FloorVisits,
}

impl<I, B> ActiveObject<I, B> {
    // ===== identity =====

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn kind(&self) -> ActorKind {
        self.kind
    }

    pub fn is_player(&self) -> bool {
        self.kind == ActorKind::Player
    }

    pub fn born_faction(&self) -> Faction {
        self.born_faction
    }

    pub fn home_floor(&self) -> FloorId {
        self.home_floor
    }

    pub fn current_floor(&self) -> Option<FloorId> {
        self.current_floor
    }

    /// Moves the actor to another floor; floor changes always need a client refresh.
    pub fn enter_floor(&mut self, floor: FloorId) {
        if self.current_floor != Some(floor) {
            self.current_floor = Some(floor);
            self.needs_notification = true;
        }
    }

    pub fn leave_floor(&mut self) {
        if self.current_floor.take().is_some() {
            self.needs_notification = true;
        }
    }

    // ===== control =====

    pub fn lifecycle(&self) -> LifecycleState {
        self.state
    }

    pub fn connection(&self) -> Option<ConnectionId> {
        self.connection
    }

    pub fn ai_in_use(&self) -> bool {
        self.ai_in_use
    }

    /// Turns server-side AI assistance on or off.
    ///
    /// Autonomous actors always run on AI; the flag only matters for players.
    pub fn set_ai_in_use(&mut self, on: bool) {
        if self.kind == ActorKind::Player && self.state != LifecycleState::Terminated {
            self.ai_in_use = on;
        }
    }

    /// Whether the decision policy should drive this actor's turns.
    pub fn is_policy_driven(&self) -> bool {
        self.state != LifecycleState::Terminated && self.ai_in_use
    }

    /// The actor's own generator, for collaborators that roll on its behalf.
    pub fn rng_mut(&mut self) -> &mut ActorRng {
        &mut self.rng
    }

    // ===== alignment and battle =====

    pub fn bias(&self) -> FactionBias {
        self.bias
    }

    pub fn set_bias(&mut self, bias: FactionBias) {
        self.bias = bias;
        self.needs_notification = true;
    }

    pub fn battle_exp(&self) -> f64 {
        self.battle_exp
    }

    pub fn add_battle_exp(&mut self, amount: f64) {
        self.battle_exp = (self.battle_exp + amount).max(0.0);
    }

    // ===== vitals =====

    pub fn hp(&self) -> f64 {
        self.hp
    }

    pub fn sp(&self) -> f64 {
        self.sp
    }

    pub fn hp_max(&self) -> f64 {
        self.turn_data.hp_max
    }

    pub fn sp_max(&self) -> f64 {
        self.turn_data.sp_max
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    pub fn set_hp(&mut self, hp: f64) {
        self.hp = clamp_vital(hp, self.turn_data.hp_max);
    }

    pub fn add_hp(&mut self, delta: f64) {
        self.set_hp(self.hp + delta);
    }

    pub fn set_sp(&mut self, sp: f64) {
        self.sp = clamp_vital(sp, self.turn_data.sp_max);
    }

    pub fn add_sp(&mut self, delta: f64) {
        self.set_sp(self.sp + delta);
    }

    /// Fills HP and SP to the current maxima.
    pub fn restore_vitals(&mut self) {
        self.hp = self.turn_data.hp_max.max(0.0);
        self.sp = self.turn_data.sp_max.max(0.0);
    }

    pub fn turn_data(&self) -> &TurnData {
        &self.turn_data
    }

    /// Installs this turn's derived stats and re-clamps vitals to the new maxima.
    pub fn apply_turn_data(&mut self, data: TurnData) {
        if data.sight != self.turn_data.sight {
            self.needs_notification = true;
        }
        self.turn_data = data;
        self.hp = clamp_vital(self.hp, data.hp_max);
        self.sp = clamp_vital(self.sp, data.sp_max);
    }

    pub fn vitals_view(&self, config: &GameConfig) -> VitalsView {
        VitalsView {
            hp: self.hp,
            hp_max: self.turn_data.hp_max,
            sp: self.sp,
            sp_max: self.turn_data.sp_max,
            sight: self.turn_data.sight,
            required_sight: config.sight_for_level(self.turn_data.level),
        }
    }

    // ===== collaborators =====

    pub fn inventory(&self) -> &I {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut I {
        &mut self.inventory
    }

    pub fn buffs(&self) -> &B {
        &self.buffs
    }

    pub fn buffs_mut(&mut self) -> &mut B {
        &mut self.buffs
    }

    // ===== counters =====

    pub fn achieve_stats(&self) -> &AchieveStats {
        &self.achieve
    }

    pub fn record_achievement(&mut self, kind: AchieveKind, amount: f64) {
        self.achieve.add(kind, amount);
    }

    pub fn usage_stats(&self) -> &UsageStats {
        &self.usage
    }

    pub fn record_potion_use(&mut self, kind: PotionKind) {
        self.usage.record_potion(kind);
        self.achieve.inc(AchieveKind::PotionUse);
    }

    pub fn record_scroll_use(&mut self, kind: ScrollKind) {
        self.usage.record_scroll(kind);
        self.achieve.inc(AchieveKind::ScrollUse);
    }

    // ===== exploration =====

    pub fn visits(&self) -> &FloorVisits {
        &self.visits
    }

    /// Marks what the actor sees from `position` on `floor` with its current sight.
    pub fn record_sight(&mut self, floor: FloorId, dims: MapDimensions, position: Position) {
        let radius = self.turn_data.sight.max(0.0) as u32;
        self.visits.area_mut(floor, dims).see_around(position, radius);
    }

    /// How much of `floor` this actor has seen, in `[0, 1]`.
    pub fn exploration_rate(&self, floor: FloorId) -> f64 {
        self.visits.complete_rate(floor)
    }

    /// Reveals the current floor as if fully explored.
    ///
    /// Returns false when the actor has no record of the floor yet.
    pub fn reveal_current_floor(&mut self) -> bool {
        let Some(floor) = self.current_floor else {
            return false;
        };
        match self.visits.get_mut(floor) {
            Some(area) => {
                area.reveal_all();
                self.needs_notification = true;
                true
            }
            None => false,
        }
    }

    /// Wipes what the actor knows about its current floor.
    pub fn forget_current_floor(&mut self) -> bool {
        let forgotten = self
            .current_floor
            .is_some_and(|floor| self.visits.forget(floor));
        if forgotten {
            self.needs_notification = true;
        }
        forgotten
    }

    // ===== timers and chat =====

    pub fn remain_turns_to_rebirth(&self) -> u32 {
        self.remain_turns_to_rebirth
    }

    pub fn set_remain_turns_to_rebirth(&mut self, turns: u32) {
        self.remain_turns_to_rebirth = turns;
    }

    /// Counts the rebirth wait down by one; true once it reaches zero.
    pub fn tick_rebirth_wait(&mut self) -> bool {
        self.remain_turns_to_rebirth = self.remain_turns_to_rebirth.saturating_sub(1);
        self.remain_turns_to_rebirth == 0
    }

    pub fn remain_turns_to_act(&self) -> f64 {
        self.remain_turns_to_act
    }

    pub fn set_remain_turns_to_act(&mut self, turns: f64) {
        self.remain_turns_to_act = turns;
    }

    pub fn chat(&self) -> Option<&Chat> {
        self.chat.as_ref()
    }

    pub fn set_chat(&mut self, text: impl Into<String>, turn: u64) {
        self.chat = Some(Chat {
            text: text.into(),
            turn,
        });
        self.needs_notification = true;
    }

    // ===== turn-scoped state =====

    /// Clears the previous turn's log and act record.
    pub fn begin_turn(&mut self) {
        self.turn_results.clear();
        self.last_act = None;
    }

    pub fn push_turn_result(&mut self, result: TurnResult) {
        self.turn_results.push(result);
    }

    pub fn turn_results(&self) -> &[TurnResult] {
        &self.turn_results
    }

    pub fn take_turn_results(&mut self) -> Vec<TurnResult> {
        core::mem::take(&mut self.turn_results)
    }

    pub fn set_needs_notification(&mut self) {
        self.needs_notification = true;
    }

    pub fn needs_notification(&self) -> bool {
        self.needs_notification
    }

    /// Returns and clears the notification flag.
    pub fn take_needs_notification(&mut self) -> bool {
        core::mem::take(&mut self.needs_notification)
    }

    /// Stores the request to apply this turn, returning any request it replaced.
    pub fn set_pending_request(&mut self, request: ActRequest) -> Option<ActRequest> {
        self.pending.replace(request)
    }

    pub fn pending_request(&self) -> Option<&ActRequest> {
        self.pending.as_ref()
    }

    pub fn take_pending_request(&mut self) -> Option<ActRequest> {
        self.pending.take()
    }

    pub fn record_act_outcome(&mut self, request: ActRequest, outcome: ActOutcome) {
        self.last_act = Some(ActRecord { request, outcome });
    }

    pub fn last_act(&self) -> Option<&ActRecord> {
        self.last_act.as_ref()
    }
}

impl<I: InventoryView, B> ActiveObject<I, B> {
    /// Read-only view of everything the decision policy needs from this actor.
    pub fn decision_view(&self, config: &GameConfig) -> ActorView<'_> {
        ActorView {
            id: self.id,
            bias: self.bias,
            vitals: self.vitals_view(config),
            conditions: self.turn_data.conditions,
            equipped: self.inventory.equipped(),
            equip_bag: self.inventory.equip_bag(),
            potion_bag: self.inventory.potion_bag(),
            scroll_bag: self.inventory.scroll_bag(),
        }
    }
}

impl<I, B> fmt::Display for ActiveObject<I, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActiveObject[{} {} {}]", self.nickname, self.kind, self.id)
    }
}

impl<I, B> fmt::Debug for ActiveObject<I, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveObject")
            .field("id", &self.id)
            .field("nickname", &self.nickname)
            .field("kind", &self.kind)
            .field("state", &self.state)
            .field("bias", &self.bias)
            .field("hp", &self.hp)
            .field("sp", &self.sp)
            .field("turn_data", &self.turn_data)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
