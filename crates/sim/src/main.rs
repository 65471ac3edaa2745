//! Headless tower simulation.
//!
//! Composition root wiring the pieces together:
//! 1. Configuration from the environment (and `.env`)
//! 2. Logging
//! 3. A generated one-floor tower with autonomous actors
//! 4. The turn loop: decide, dispatch, apply
//!
//! ```bash
//! TOWER_CONFIG=demos/tower.toml TOWER_NAMES=demos/names.ron RUST_LOG=debug \
//!     cargo run -p tower-sim
//! ```

mod tower;

use anyhow::Result;
use tower_content::NameLoader;
use tower_core::{ActiveObject, ActorRng, Bag, NoopPlanner, SpawnParams, TurnData};
use tower_runtime::{
    ActorDriver, Dispatcher, LogSink, RuntimeConfig, apply_bag_request, setup_logging,
};

use crate::tower::Tower;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let runtime_config = RuntimeConfig::from_env()?;

    // 2. Setup logging
    setup_logging()?;

    tracing::info!("Starting tower simulation");
    tracing::info!("Seed: {:#x}", runtime_config.seed);
    tracing::info!("Stages: {:?}", runtime_config.auto_acts);

    let game_config = runtime_config.load_game_config()?;
    let names = match &runtime_config.names_path {
        Some(path) => NameLoader::load(path)?,
        None => Vec::new(),
    };

    // 3. Build the tower and its population
    let mut world_rng = ActorRng::seed_from(runtime_config.seed);
    let mut tower = Tower::generate(&mut world_rng);

    let mut actors: Vec<ActiveObject<Bag, ()>> = Vec::with_capacity(runtime_config.actors);
    for _ in 0..runtime_config.actors {
        let params = SpawnParams {
            config: &game_config,
            home_floor: tower::FLOOR,
            inventory: Bag::new(),
            buffs: (),
            planner: Box::new(NoopPlanner),
            rng: world_rng.fork(),
        };
        let mut actor = ActiveObject::new_autonomous(params, &names);
        let level = 1 + world_rng.below(5);
        actor.apply_turn_data(TurnData::new(
            80.0 + 10.0 * level as f64,
            40.0 + 5.0 * level as f64,
            game_config.sight_for_level(level),
            level,
        ));
        actor.restore_vitals();
        tower.place(&mut actor, &mut world_rng);
        tracing::debug!(actor = %actor, bias = ?actor.bias(), "spawned");
        actors.push(actor);
    }

    // 4. Run the turns
    let (dispatcher, handle) = Dispatcher::spawn(LogSink);
    let driver = ActorDriver::new(game_config, runtime_config.auto_acts, handle);

    for turn in 0..runtime_config.turns {
        tower.sync_vitals(&actors);
        let report = driver.run_turn(tower.snapshot(), &mut actors);
        tracing::info!(
            turn,
            decided = report.decided.len(),
            idle = report.idle.len(),
            reborn = report.reborn.len(),
            skipped = report.skipped,
            "turn decided"
        );

        for index in 0..actors.len() {
            let Some(request) = actors[index].take_pending_request() else {
                continue;
            };
            let outcome = match apply_bag_request(&mut actors[index], request) {
                Some(outcome) => outcome,
                None => tower.apply_world_request(&mut actors, index, request),
            };
            tracing::debug!(actor = %actors[index], ?request, ?outcome, "applied");
        }
    }

    drop(driver);
    let stats = dispatcher.join().await?;

    for actor in &actors {
        tracing::info!(
            actor = %actor,
            hp = actor.hp(),
            kills = actor.achieve_stats().get(tower_core::AchieveKind::Kill),
            deaths = actor.achieve_stats().get(tower_core::AchieveKind::Death),
            "final state"
        );
    }
    tracing::info!(
        delivered = stats.delivered,
        failed = stats.failed,
        "Simulation complete"
    );
    Ok(())
}
