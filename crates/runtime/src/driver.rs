//! Authoritative turn driver.
//!
//! Once per turn the driver visits every actor in ascending id order, records
//! what it sees, builds its decision snapshot from the turn-start
//! [`WorldSnapshot`], asks the policy for a request, parks it in the actor's
//! pending cell and queues it for dispatch. It never waits on the dispatch
//! task.

use tracing::{debug, info, warn};

use tower_core::{
    ActRequest, ActiveObject, ActorId, AutoActs, Bag, DecisionSnapshot, GameConfig, decide,
};

use crate::dispatch::{ActDispatch, DispatchHandle};
use crate::snapshot::WorldSnapshot;

/// What happened during one [`ActorDriver::run_turn`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TurnReport {
    /// Requests chosen this turn, in visiting order.
    pub decided: Vec<(ActorId, ActRequest)>,
    /// Policy-driven actors with nothing to do.
    pub idle: Vec<ActorId>,
    pub reborn: Vec<ActorId>,
    /// Terminated actors, players without AI, dead actors waiting and actors
    /// missing from the world snapshot.
    pub skipped: usize,
    /// Requests that could not be queued because dispatch had stopped.
    pub undelivered: usize,
}

/// Drives policy-controlled actors.
pub struct ActorDriver {
    config: GameConfig,
    acts: AutoActs,
    rebirth_delay: u32,
    dispatch: DispatchHandle,
}

impl ActorDriver {
    /// Turns a dead actor waits before it is reborn.
    pub const DEFAULT_REBIRTH_DELAY: u32 = 3;

    pub fn new(config: GameConfig, acts: AutoActs, dispatch: DispatchHandle) -> Self {
        Self {
            config,
            acts,
            rebirth_delay: Self::DEFAULT_REBIRTH_DELAY,
            dispatch,
        }
    }

    pub fn with_rebirth_delay(mut self, turns: u32) -> Self {
        self.rebirth_delay = turns;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Runs one decision pass over `actors`.
    pub fn run_turn<B>(
        &self,
        world: &WorldSnapshot,
        actors: &mut [ActiveObject<Bag, B>],
    ) -> TurnReport {
        let mut report = TurnReport::default();

        let mut order: Vec<usize> = (0..actors.len()).collect();
        order.sort_by_key(|&index| actors[index].id());

        for index in order {
            let actor = &mut actors[index];
            if !actor.is_policy_driven() {
                report.skipped += 1;
                continue;
            }

            actor.begin_turn();

            if !actor.is_alive() {
                if self.wait_for_rebirth(actor) {
                    report.reborn.push(actor.id());
                }
                if !actor.is_alive() {
                    report.skipped += 1;
                    continue;
                }
            }

            let Some(perception) = world.perceive(actor.id(), actor.turn_data().sight) else {
                debug!(actor = %actor, "not on a known floor");
                report.skipped += 1;
                continue;
            };

            let floor = perception.floor();
            actor.enter_floor(floor.id());
            actor.record_sight(floor.id(), floor.dims(), perception.position());
            let explored = actor.exploration_rate(floor.id());

            let snapshot = DecisionSnapshot::new(
                actor.decision_view(&self.config),
                perception.surroundings(explored),
            );
            let Some(request) = decide(&snapshot, self.acts) else {
                debug!(actor = %actor, "nothing to do");
                report.idle.push(actor.id());
                continue;
            };

            debug!(actor = %actor, ?request, "decided");
            if let Some(replaced) = actor.set_pending_request(request) {
                debug!(actor = %actor, ?replaced, "replaced unapplied request");
            }
            report.decided.push((actor.id(), request));

            let dispatch = ActDispatch {
                actor: actor.id(),
                request,
            };
            if let Err(e) = self.dispatch.send(dispatch) {
                warn!(actor = %actor, error = %e, "request not dispatched");
                report.undelivered += 1;
            }
        }

        report
    }

    /// Counts a dead actor's wait down and reincarnates it when it runs out.
    ///
    /// Returns true when the actor was reborn this turn.
    fn wait_for_rebirth<B>(&self, actor: &mut ActiveObject<Bag, B>) -> bool {
        if actor.remain_turns_to_rebirth() == 0 {
            actor.set_remain_turns_to_rebirth(self.rebirth_delay);
        }
        if !actor.tick_rebirth_wait() {
            return false;
        }

        match actor.rebirth(&self.config) {
            Ok(()) => {
                info!(actor = %actor, hp = actor.hp(), "reborn");
                true
            }
            Err(e) => {
                warn!(actor = %actor, error = %e, "rebirth rejected");
                false
            }
        }
    }
}
