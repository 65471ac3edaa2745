use tower_core::{
    ActRequest, ActiveObject, ActorRng, AutoActs, Bag, Bias, ConnectionId, EquipItem, EquipSlot,
    Faction, FactionBias, FloorId, GameConfig, Inventory, InventoryView, ItemId, MapDimensions,
    NoopPlanner, Position, ScrollItem, ScrollKind, SpawnParams, TurnData, Way9,
};
use tower_runtime::{
    ActDispatch, ActorDriver, ActorSighting, ChannelSink, Dispatcher, FloorSnapshot, LogSink,
    RuntimeError, WorldSnapshot, apply_bag_request,
};

const FLOOR: FloorId = FloorId(1);

fn bare_config() -> GameConfig {
    GameConfig {
        init_equip_count: 0,
        init_potion_count: 0,
        init_scroll_count: 0,
        ..GameConfig::default()
    }
}

fn params(config: &GameConfig, seed: u64) -> SpawnParams<'_, Bag, ()> {
    SpawnParams {
        config,
        home_floor: FLOOR,
        inventory: Bag::new(),
        buffs: (),
        planner: Box::new(NoopPlanner),
        rng: ActorRng::seed_from(seed),
    }
}

fn ready(mut actor: ActiveObject<Bag, ()>) -> ActiveObject<Bag, ()> {
    actor.apply_turn_data(TurnData::new(100.0, 100.0, 4.0, 1));
    actor.restore_vitals();
    actor.enter_floor(FLOOR);
    actor
}

fn world_with(actors: &[(&ActiveObject<Bag, ()>, Position)]) -> WorldSnapshot {
    let mut world = WorldSnapshot::new(FactionBias::zero());
    world.add_floor(FloorSnapshot::new(FLOOR, MapDimensions::new(10, 10)));
    for (actor, position) in actors {
        world.record_sighting(ActorSighting {
            id: actor.id(),
            floor: FLOOR,
            position: *position,
            alive: actor.is_alive(),
        });
    }
    world
}

fn strong_armor(id: u64, bias: FactionBias) -> EquipItem {
    EquipItem::new(
        ItemId(id),
        "armor",
        EquipSlot::Armor,
        Faction::Crimson,
        bias.scale(2.0),
    )
}

#[tokio::test]
async fn decisions_are_queued_in_id_order() {
    let config = bare_config();
    let mut actors = vec![
        ready(ActiveObject::new_autonomous(params(&config, 10), &[])),
        ready(ActiveObject::new_autonomous(params(&config, 20), &[])),
    ];
    for (i, actor) in actors.iter_mut().enumerate() {
        let armor = strong_armor(100 + i as u64, actor.bias());
        actor.inventory_mut().add_to_bag(armor.into());
    }

    let world = world_with(&[
        (&actors[0], Position::new(1, 1)),
        (&actors[1], Position::new(6, 6)),
    ]);

    let (sink, mut rx) = ChannelSink::new();
    let (dispatcher, handle) = Dispatcher::spawn(sink);
    let driver = ActorDriver::new(config, AutoActs::default(), handle);

    let report = driver.run_turn(&world, &mut actors);
    assert_eq!(report.decided.len(), 2);
    assert!(report.decided[0].0 < report.decided[1].0);
    for actor in &actors {
        assert!(matches!(
            actor.pending_request(),
            Some(ActRequest::Equip { .. })
        ));
    }

    drop(driver);
    let stats = dispatcher.join().await.unwrap();
    assert_eq!(stats.delivered, 2);
    assert_eq!(stats.failed, 0);

    let mut received: Vec<ActDispatch> = Vec::new();
    while let Ok(dispatch) = rx.try_recv() {
        received.push(dispatch);
    }
    let expected: Vec<ActDispatch> = report
        .decided
        .iter()
        .map(|&(actor, request)| ActDispatch { actor, request })
        .collect();
    assert_eq!(received, expected);
}

#[tokio::test]
async fn players_without_ai_and_terminated_actors_are_skipped() {
    let config = bare_config();
    let player = ready(ActiveObject::new_player(
        params(&config, 1),
        "hero",
        ConnectionId(9),
    ));
    let mut gone = ready(ActiveObject::new_autonomous(params(&config, 2), &[]));
    gone.cleanup().unwrap();
    let mut actors = vec![player, gone];

    let world = world_with(&[
        (&actors[0], Position::new(1, 1)),
        (&actors[1], Position::new(6, 6)),
    ]);
    let (dispatcher, handle) = Dispatcher::spawn(LogSink);
    let driver = ActorDriver::new(config, AutoActs::default(), handle);

    let report = driver.run_turn(&world, &mut actors);
    assert_eq!(report.skipped, 2);
    assert!(report.decided.is_empty());

    // switching the assist on hands the player to the driver
    actors[0].set_ai_in_use(true);
    let report = driver.run_turn(&world, &mut actors);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.idle, vec![actors[0].id()]);

    drop(driver);
    assert_eq!(dispatcher.join().await.unwrap().delivered, 0);
}

#[tokio::test]
async fn adjacent_enemy_is_attacked_across_the_edge() {
    let config = bare_config();
    let mut actors = vec![
        ready(ActiveObject::new_autonomous(params(&config, 3), &[])),
        ready(ActiveObject::new_autonomous(params(&config, 4), &[])),
    ];
    actors.sort_by_key(|a| a.id());

    let world = world_with(&[
        (&actors[0], Position::new(0, 5)),
        (&actors[1], Position::new(9, 5)),
    ]);
    let (dispatcher, handle) = Dispatcher::spawn(LogSink);
    let driver = ActorDriver::new(config, AutoActs::BATTLE, handle);

    let report = driver.run_turn(&world, &mut actors);
    assert_eq!(
        report.decided,
        vec![
            (actors[0].id(), ActRequest::Attack { dir: Way9::West }),
            (actors[1].id(), ActRequest::Attack { dir: Way9::East }),
        ]
    );

    drop(driver);
    dispatcher.join().await.unwrap();
}

#[tokio::test]
async fn dead_actor_is_reborn_after_delay() {
    let config = bare_config();
    let mut actors = vec![ready(ActiveObject::new_autonomous(params(&config, 5), &[]))];
    actors[0].set_hp(0.0);
    let id = actors[0].id();

    let world = world_with(&[(&actors[0], Position::new(3, 3))]);
    let (dispatcher, handle) = Dispatcher::spawn(LogSink);
    let driver = ActorDriver::new(config, AutoActs::default(), handle).with_rebirth_delay(2);

    let first = driver.run_turn(&world, &mut actors);
    assert!(first.reborn.is_empty());
    assert_eq!(first.skipped, 1);

    let second = driver.run_turn(&world, &mut actors);
    assert_eq!(second.reborn, vec![id]);
    assert_eq!(actors[0].hp(), 50.0);

    drop(driver);
    dispatcher.join().await.unwrap();
}

#[tokio::test]
async fn closed_dispatch_is_reported_not_fatal() {
    let config = bare_config();
    let mut actors = vec![ready(ActiveObject::new_autonomous(params(&config, 6), &[]))];
    let armor = strong_armor(1, actors[0].bias());
    actors[0].inventory_mut().add_to_bag(armor.into());

    let world = world_with(&[(&actors[0], Position::new(3, 3))]);
    let (dispatcher, handle) = Dispatcher::spawn(LogSink);
    dispatcher.abort();
    // wait for the receiver to go away
    while !handle.is_closed() {
        tokio::task::yield_now().await;
    }

    let driver = ActorDriver::new(config, AutoActs::default(), handle);
    let report = driver.run_turn(&world, &mut actors);
    assert_eq!(report.decided.len(), 1);
    assert_eq!(report.undelivered, 1);
    assert!(actors[0].pending_request().is_some());
}

#[tokio::test]
async fn floor_map_is_read_once_per_floor() {
    let config = bare_config();
    let mut actors = vec![ready(ActiveObject::new_autonomous(params(&config, 7), &[]))];
    for id in 1..=3 {
        actors[0]
            .inventory_mut()
            .add_to_bag(ScrollItem::new(ItemId(id), ScrollKind::FloorMap).into());
    }
    let id = actors[0].id();

    let world = world_with(&[(&actors[0], Position::new(3, 3))]);
    let (dispatcher, handle) = Dispatcher::spawn(LogSink);
    let driver = ActorDriver::new(config, AutoActs::default(), handle);

    let first = driver.run_turn(&world, &mut actors);
    assert_eq!(
        first.decided,
        vec![(id, ActRequest::ReadScroll { item: ItemId(1) })]
    );
    assert!(actors[0].exploration_rate(FLOOR) < 1.0);

    let request = actors[0].take_pending_request().unwrap();
    apply_bag_request(&mut actors[0], request);
    assert_eq!(actors[0].exploration_rate(FLOOR), 1.0);

    // the floor is now fully known to this actor
    for _ in 0..2 {
        let report = driver.run_turn(&world, &mut actors);
        assert!(report.decided.is_empty(), "re-read on a known floor");
        assert_eq!(report.idle, vec![id]);
    }
    assert_eq!(actors[0].inventory().scroll_bag().len(), 2);

    drop(driver);
    dispatcher.join().await.unwrap();
}

#[tokio::test]
async fn dropped_downstream_counts_as_failed_delivery() {
    let (sink, rx) = ChannelSink::new();
    drop(rx);
    let (dispatcher, handle) = Dispatcher::spawn(sink);

    let config = bare_config();
    let actor = ready(ActiveObject::new_autonomous(params(&config, 8), &[]));
    handle
        .send(ActDispatch {
            actor: actor.id(),
            request: ActRequest::Move { dir: Way9::North },
        })
        .unwrap();
    drop(handle);

    let stats = dispatcher.join().await.unwrap();
    assert_eq!(stats.delivered, 0);
    assert_eq!(stats.failed, 1);
}

#[tokio::test]
async fn channel_sink_reports_rejection_for_the_actor() {
    use tower_runtime::ActionSink;

    let (mut sink, rx) = ChannelSink::new();
    drop(rx);
    let dispatch = ActDispatch {
        actor: tower_core::ActorId(12),
        request: ActRequest::Move { dir: Way9::East },
    };
    match sink.deliver(dispatch).await {
        Err(RuntimeError::SinkRejected { actor, .. }) => assert_eq!(actor, dispatch.actor),
        other => panic!("unexpected delivery result: {other:?}"),
    }
}

#[test]
fn bias_helper_is_faction_aligned() {
    let bias = Faction::Azure.base_bias();
    assert_eq!(strong_armor(1, bias).bias, Bias::from_array([0.0, 0.0, 0.0, 2.0, 0.0, 0.0]));
}
