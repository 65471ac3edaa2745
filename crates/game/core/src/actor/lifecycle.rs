//! Creation, suspension, rebirth and teardown of actors.
//!
//! ```text
//!   new_player / new_autonomous
//!               │
//!               ▼
//!   ┌──────── Active ◀──── resume ────┐
//!   │           │                      │
//!   │        suspend ─────────▶ Suspended
//!   │           │                      │
//!   └─ cleanup ─┴──▶ Terminated ◀── cleanup
//! ```
//!
//! `rebirth` keeps the state it was called in. Every operation called from a
//! state that does not allow it fails with
//! [`LifecycleError::InvalidTransition`] and changes nothing.

use super::{
    AchieveKind, AchieveStats, ActiveObject, ActorId, ActorKind, FloorVisits, TurnData, TurnResult,
    UsageStats,
};
use crate::bias::Faction;
use crate::config::GameConfig;
use crate::env::{ConnectionId, FloorId, Inventory, Planner, TypeCount};
use crate::error::LifecycleError;
use crate::item::{EquipItem, ItemId, PotionItem, PotionKind, ScrollItem, ScrollKind};
use crate::rng::ActorRng;

/// Nickname used when an autonomous actor is created from an empty name list.
pub const FALLBACK_NICKNAME: &str = "Wanderer";

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum LifecycleState {
    Active,
    Suspended,
    Terminated,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum LifecycleOp {
    Suspend,
    Resume,
    Rebirth,
    Cleanup,
}

/// Everything a new actor is built from besides its kind-specific inputs.
pub struct SpawnParams<'a, I, B> {
    pub config: &'a GameConfig,
    pub home_floor: FloorId,
    pub inventory: I,
    pub buffs: B,
    pub planner: Box<dyn Planner>,
    /// Source of the id, born faction, nickname and starting items.
    pub rng: ActorRng,
}

impl<I: Inventory, B> ActiveObject<I, B> {
    /// Creates a client-controlled actor with twice the usual starting kit.
    pub fn new_player(
        params: SpawnParams<'_, I, B>,
        nickname: impl Into<String>,
        connection: ConnectionId,
    ) -> Self {
        let config = params.config;
        let mut actor = Self::new_actor(params, ActorKind::Player, |_| nickname.into());
        actor.connection = Some(connection);
        actor.ai_in_use = false;

        actor.add_faction_equipment(config.init_equip_count * 2, config);
        actor.add_random_potions(config.init_potion_count * 2);
        actor.add_random_scrolls(config.init_scroll_count * 2);
        actor.add_init_gold(config);
        actor
    }

    /// Creates a policy-driven actor named from `names`.
    pub fn new_autonomous(params: SpawnParams<'_, I, B>, names: &[String]) -> Self {
        let config = params.config;
        let mut actor = Self::new_actor(params, ActorKind::Autonomous, |rng| {
            rng.pick(names)
                .cloned()
                .unwrap_or_else(|| FALLBACK_NICKNAME.to_owned())
        });
        actor.ai_in_use = true;

        actor.add_faction_equipment(config.init_equip_count, config);
        actor.add_random_potions(config.init_potion_count);
        actor.add_random_scrolls(config.init_scroll_count);
        actor.add_init_gold(config);
        actor
    }

    fn new_actor(
        params: SpawnParams<'_, I, B>,
        kind: ActorKind,
        nickname: impl FnOnce(&mut ActorRng) -> String,
    ) -> Self {
        let SpawnParams {
            config,
            home_floor,
            inventory,
            buffs,
            planner,
            mut rng,
        } = params;

        let id = ActorId(rng.next_u64());
        let born_faction = Faction::ALL[rng.below(Faction::ALL.len() as u32) as usize];
        let bias = born_faction.base_bias().make_abs_sum_to(config.base_bias_len);
        let nickname = nickname(&mut rng);

        Self {
            rng,
            id,
            nickname,
            kind,
            born_faction,
            home_floor,
            current_floor: None,
            state: LifecycleState::Active,
            connection: None,
            planner: Some(planner),
            ai_in_use: false,
            achieve: AchieveStats::default(),
            usage: UsageStats::default(),
            remain_turns_to_rebirth: 0,
            remain_turns_to_act: 0.0,
            chat: None,
            battle_exp: 0.0,
            bias,
            hp: 0.0,
            sp: 0.0,
            inventory,
            buffs,
            turn_data: TurnData::default(),
            needs_notification: false,
            turn_results: Vec::new(),
            pending: None,
            last_act: None,
            visits: FloorVisits::default(),
        }
    }

    /// Detaches the client; the actor stays in the world. Active only.
    pub fn suspend(&mut self) -> Result<(), LifecycleError> {
        self.require(LifecycleOp::Suspend, &[LifecycleState::Active])?;
        self.connection = None;
        self.state = LifecycleState::Suspended;
        Ok(())
    }

    /// Reattaches a client to a suspended actor.
    pub fn resume(&mut self, connection: ConnectionId) -> Result<(), LifecycleError> {
        self.require(LifecycleOp::Resume, &[LifecycleState::Suspended])?;
        self.connection = Some(connection);
        self.state = LifecycleState::Active;
        Ok(())
    }

    /// Brings a dead actor back with a fraction of its maxima.
    ///
    /// Autonomous actors are restocked up to the configured minimums and may
    /// get gold; players keep whatever they carried.
    pub fn rebirth(&mut self, config: &GameConfig) -> Result<(), LifecycleError> {
        self.require(
            LifecycleOp::Rebirth,
            &[LifecycleState::Active, LifecycleState::Suspended],
        )?;

        self.set_hp(self.turn_data.hp_max * config.rebirth_hp_rate);
        self.set_sp(self.turn_data.sp_max * config.rebirth_sp_rate);
        self.needs_notification = true;
        self.achieve.inc(AchieveKind::Rebirth);
        self.turn_results.push(TurnResult::Rebirth);

        if self.kind == ActorKind::Autonomous {
            let TypeCount {
                equip,
                potion,
                scroll,
            } = self.inventory.type_count();
            if equip < config.init_equip_count {
                self.add_faction_equipment(config.init_equip_count - equip, config);
            }
            if potion < config.init_potion_count {
                self.add_random_potions(config.init_potion_count - potion);
            }
            if scroll < config.init_scroll_count {
                self.add_random_scrolls(config.init_scroll_count - scroll);
            }
            self.add_init_gold(config);
        }

        if let Some(planner) = self.planner.as_mut() {
            planner.reset_plan();
        }
        Ok(())
    }

    /// Final teardown. The planner is cleaned up and released.
    pub fn cleanup(&mut self) -> Result<(), LifecycleError> {
        self.require(
            LifecycleOp::Cleanup,
            &[LifecycleState::Active, LifecycleState::Suspended],
        )?;

        self.ai_in_use = false;
        if let Some(mut planner) = self.planner.take() {
            planner.cleanup();
        }
        self.connection = None;
        self.pending = None;
        self.state = LifecycleState::Terminated;
        Ok(())
    }

    fn require(&self, op: LifecycleOp, allowed: &[LifecycleState]) -> Result<(), LifecycleError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(LifecycleError::InvalidTransition {
                actor: self.id,
                from: self.state,
                op,
            })
        }
    }

    // ===== provisioning =====

    fn add_faction_equipment(&mut self, count: u32, config: &GameConfig) {
        let faction = self.near_faction();
        for _ in 0..count {
            let item = EquipItem::random_of_faction(&self.nickname, faction, &mut self.rng, config);
            self.inventory.add_to_bag(item.into());
        }
    }

    fn add_random_potions(&mut self, count: u32) {
        for _ in 0..count {
            let kind = PotionKind::from_make_roll(self.rng.below(PotionKind::TOTAL_MAKE_RATE));
            let id = ItemId(self.rng.next_u64());
            self.inventory.add_to_bag(PotionItem::new(id, kind).into());
        }
    }

    fn add_random_scrolls(&mut self, count: u32) {
        for _ in 0..count {
            let kind = ScrollKind::from_make_roll(self.rng.below(ScrollKind::TOTAL_MAKE_RATE));
            let id = ItemId(self.rng.next_u64());
            self.inventory.add_to_bag(ScrollItem::new(id, kind).into());
        }
    }

    fn add_init_gold(&mut self, config: &GameConfig) {
        let mean = config.init_gold_mean;
        if self.inventory.wallet_value() >= mean {
            return;
        }
        let amount = self.rng.norm_f64_range(mean, mean / 2.0).max(1.0);
        self.inventory.add_to_wallet(amount);
        self.achieve.add(AchieveKind::MoneyGet, amount);
    }

    fn near_faction(&self) -> Faction {
        self.bias.near_faction()
    }
}
