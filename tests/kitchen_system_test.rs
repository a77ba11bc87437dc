use kitchen_shelves::actors::{FixedSchedule, UniformSchedule, VecSource};
use kitchen_shelves::config::{KitchenConfig, PickupInterval};
use kitchen_shelves::framework::{FrameworkError, ShelfContext};
use kitchen_shelves::kitchen::{KitchenError, KitchenEvent, Placement, ShelfStore};
use kitchen_shelves::lifecycle::{KitchenSystem, RunPhase};
use kitchen_shelves::model::{Order, Shelf, ShelfCapacities, Temperature};
use std::time::Duration;
use tokio::sync::mpsc;

fn orders(count: usize, life: f64, rate: f64) -> Vec<Order> {
    let temps = [Temperature::Hot, Temperature::Cold, Temperature::Frozen];
    (0..count)
        .map(|i| {
            Order::new(
                format!("o{i}"),
                format!("dish {i}"),
                temps[i % temps.len()],
                life,
                rate,
            )
            .expect("valid order")
        })
        .collect()
}

fn drain_events(rx: &mut mpsc::UnboundedReceiver<KitchenEvent>) -> Vec<KitchenEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Full end-to-end run with all real timelines on a paused clock.
#[tokio::test(start_paused = true)]
async fn test_full_simulation_conserves_every_order() {
    let config = KitchenConfig::default();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let system = KitchenSystem::new(
        &config,
        UniformSchedule::seeded(config.pickup_interval, 11),
        ShelfContext::with_events(tx),
    );

    let summary = system
        .run(VecSource::new(orders(60, 30.0, 0.5)))
        .await
        .expect("run should drain cleanly");

    assert_eq!(summary.total_orders_seen, 60);
    assert!(summary.is_conserved(), "{summary}");
    for shelf in Shelf::ALL {
        assert_eq!(
            summary.free_capacity(shelf),
            config.capacities.of(shelf),
            "{shelf} not free at the end"
        );
    }

    let events = drain_events(&mut rx);
    let arrived = events
        .iter()
        .filter(|e| matches!(e, KitchenEvent::Arrived { .. }))
        .count();
    let picked: Vec<&Order> = events
        .iter()
        .filter_map(|e| match e {
            KitchenEvent::PickedUp { order } => Some(order),
            _ => None,
        })
        .collect();
    assert_eq!(arrived, 60);
    assert_eq!(picked.len(), summary.delivered);
    assert!(picked.iter().all(|order| !order.is_expired()));
}

#[tokio::test(start_paused = true)]
async fn test_short_lived_orders_all_expire() {
    let config = KitchenConfig {
        arrival_rate: 4.0,
        ..KitchenConfig::default()
    };
    // Couriers arrive long after everything has gone off.
    let system = KitchenSystem::new(
        &config,
        FixedSchedule(Duration::from_secs(3_600)),
        ShelfContext::default(),
    );

    let summary = system.run(VecSource::new(orders(6, 1.0, 2.0))).await.unwrap();

    assert_eq!(summary.total_orders_seen, 6);
    assert_eq!(summary.expired_discards, 6);
    assert_eq!(summary.delivered, 0);
    assert_eq!(summary.capacity_discards, 0);
}

#[tokio::test(start_paused = true)]
async fn test_tiny_kitchen_discards_for_space() {
    let mut config = KitchenConfig {
        arrival_rate: 10.0,
        pickup_interval: PickupInterval {
            lower_secs: 5,
            upper_secs: 5,
        },
        ..KitchenConfig::default()
    };
    config.capacities.hot = 1;
    config.capacities.cold = 1;
    config.capacities.frozen = 1;
    config.capacities.overflow = 1;

    let system = KitchenSystem::new(
        &config,
        UniformSchedule::new(config.pickup_interval),
        ShelfContext::default(),
    );
    let summary = system.run(VecSource::new(orders(12, 100.0, 1.0))).await.unwrap();

    assert!(summary.capacity_discards > 0, "{summary}");
    assert!(summary.is_conserved());
    assert!(summary.check_drained().is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_empty_source_finishes_immediately() {
    let config = KitchenConfig::default();
    let system = KitchenSystem::new(
        &config,
        UniformSchedule::seeded(config.pickup_interval, 1),
        ShelfContext::default(),
    );

    let summary = system.run(VecSource::new(Vec::new())).await.unwrap();
    assert_eq!(summary.total_orders_seen, 0);
    assert!(summary.check_drained().is_ok());
}

/// A live feed keeps the run going until its last sender is dropped.
#[tokio::test(start_paused = true)]
async fn test_live_feed_drains_after_sender_drops() {
    let config = KitchenConfig::default();
    let system = KitchenSystem::new(
        &config,
        FixedSchedule(Duration::from_secs(1)),
        ShelfContext::default(),
    );
    let client = system.client();

    let (feed, source) = mpsc::channel(8);
    let run = tokio::spawn(system.run(source));

    for order in orders(5, 60.0, 1.0) {
        feed.send(order).await.unwrap();
    }
    tokio::time::sleep(Duration::from_millis(1_100)).await;
    let levels = client.snapshot().await.unwrap();
    let held: usize = levels.iter().map(|level| level.held).sum();
    assert!(held <= 5);
    drop(client);
    drop(feed);

    let summary = run.await.unwrap().unwrap();
    assert_eq!(summary.total_orders_seen, 5);
    assert!(summary.is_conserved());
}

#[test]
fn test_invalid_settings_are_rejected_before_the_run() {
    let config = KitchenConfig {
        arrival_rate: 0.0,
        ..KitchenConfig::default()
    };
    assert!(matches!(config.validate(), Err(KitchenError::InvalidConfig(_))));

    let result = Order::new("bad", "Bad", Temperature::Hot, -1.0, 1.0);
    assert!(matches!(result, Err(KitchenError::InvalidOrder { .. })));
}

/// An inspection client held across the whole run must not keep the actor alive.
#[tokio::test(start_paused = true)]
async fn test_run_returns_while_an_inspector_is_alive() {
    let config = KitchenConfig::default();
    let system = KitchenSystem::new(
        &config,
        FixedSchedule(Duration::from_secs(2)),
        ShelfContext::default(),
    );
    let inspector = system.client();

    let summary = tokio::time::timeout(
        Duration::from_secs(3_600),
        system.run(VecSource::new(orders(1, 60.0, 1.0))),
    )
    .await
    .expect("run should return with a client clone alive")
    .unwrap();
    assert_eq!(summary.delivered, 1);

    assert!(matches!(
        inspector.summary().await,
        Err(KitchenError::Framework(FrameworkError::ActorClosed))
    ));
}

/// The run stays in `Running` while a live feed is open, then drains, then finishes.
#[tokio::test(start_paused = true)]
async fn test_phases_follow_running_draining_done() {
    let config = KitchenConfig::default();
    let system = KitchenSystem::new(
        &config,
        // Couriers come late enough that orders are still held when the feed closes.
        FixedSchedule(Duration::from_secs(20)),
        ShelfContext::default(),
    );
    assert_eq!(system.phase(), RunPhase::Running);

    let mut phases = system.phases();
    let recorder = tokio::spawn(async move {
        let mut seen = Vec::new();
        while phases.changed().await.is_ok() {
            seen.push(*phases.borrow_and_update());
        }
        seen
    });

    let (feed, source) = mpsc::channel(8);
    let run = tokio::spawn(system.run(source));
    for order in orders(3, 60.0, 1.0) {
        feed.send(order).await.unwrap();
    }

    // Every order is long since posted, yet the feed is still open.
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(!run.is_finished());
    drop(feed);

    let summary = run.await.unwrap().unwrap();
    assert_eq!(summary.total_orders_seen, 3);
    assert_eq!(
        recorder.await.unwrap(),
        [RunPhase::Draining, RunPhase::Done]
    );
}

/// A failing timeline ends the run with its error and stops the others.
#[tokio::test(start_paused = true)]
async fn test_timeline_failure_aborts_the_run() {
    // An order that already sits on a shelf cannot be placed again.
    let mut elsewhere = ShelfStore::new(ShelfCapacities::default(), 2.0);
    let shelved = match elsewhere.place(orders(1, 60.0, 1.0).remove(0)).unwrap() {
        Placement::Placed { order } => order,
        other => panic!("unexpected placement {other:?}"),
    };

    let config = KitchenConfig::default();
    let system = KitchenSystem::new(
        &config,
        FixedSchedule(Duration::from_secs(3_600)),
        ShelfContext::default(),
    );
    let mut phases = system.phases();
    let mut source = orders(1, 60.0, 1.0);
    source.push(shelved);

    let result = tokio::time::timeout(
        Duration::from_secs(60),
        system.run(VecSource::new(source)),
    )
    .await
    .expect("a failed run should not wait for the couriers");

    assert!(matches!(result, Err(KitchenError::InvariantViolation(_))));
    assert_eq!(*phases.borrow_and_update(), RunPhase::Done);
}
