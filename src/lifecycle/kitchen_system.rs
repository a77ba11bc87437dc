use crate::actors::{ArrivalFeed, CourierFeed, DecayScheduler, OrderSource, PickupSchedule};
use crate::config::KitchenConfig;
use crate::framework::{FrameworkError, ShelfActor, ShelfClient, ShelfContext};
use crate::kitchen::{KitchenError, Summary};
use std::fmt::Display;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, error, info};

/// Where a run stands.
///
/// `Running` while orders may still arrive, `Draining` once the arrival stream has ended
/// but orders remain on the shelves, `Done` once both are exhausted. `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Running,
    Draining,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timeline {
    Arrivals,
    Decay,
    Couriers,
}

impl Display for Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Timeline::Arrivals => "arrivals",
            Timeline::Decay => "decay",
            Timeline::Couriers => "couriers",
        };
        f.write_str(name)
    }
}

/// The run loop of the kitchen.
///
/// `KitchenSystem` is responsible for:
/// - **Lifecycle Management**: starting the shelf actor and the three timelines, and
///   stopping them once the run is over
/// - **Phase Tracking**: moving `Running → Draining → Done` and broadcasting the phase
///   to the timelines
/// - **Final Checks**: verifying the drain invariants before handing back the [`Summary`]
///
/// # Example
///
/// ```ignore
/// let system = KitchenSystem::new(&config, UniformSchedule::new(config.pickup_interval), ShelfContext::default());
/// let summary = system.run(VecSource::new(orders)).await?;
/// println!("{summary}");
/// ```
pub struct KitchenSystem {
    client: ShelfClient,
    phase: watch::Sender<RunPhase>,
    actor: JoinHandle<()>,
    timelines: JoinSet<(Timeline, Result<usize, KitchenError>)>,
    arrival_interval: Duration,
}

impl KitchenSystem {
    /// Starts the shelf actor, the decay scheduler and the courier feed.
    ///
    /// Arrivals start with [`run`](Self::run). Must be called inside a Tokio runtime.
    pub fn new<P>(config: &KitchenConfig, schedule: P, context: ShelfContext) -> Self
    where
        P: PickupSchedule + 'static,
    {
        let (actor, client) = ShelfActor::new(
            config.channel_buffer,
            config.capacities,
            config.overflow_decay_multiplier,
        );
        let actor = tokio::spawn(actor.run(context));
        info!(
            slots = config.capacities.total(),
            overflow = config.capacities.overflow,
            "Kitchen open"
        );
        let (phase, phase_rx) = watch::channel(RunPhase::Running);

        let mut timelines = JoinSet::new();
        let decay = DecayScheduler::new(client.clone(), config.decay_period(), phase_rx.clone());
        timelines.spawn(async move { (Timeline::Decay, decay.run().await) });
        let couriers = CourierFeed::new(client.clone(), schedule, phase_rx);
        timelines.spawn(async move { (Timeline::Couriers, couriers.run().await) });

        Self {
            client,
            phase,
            actor,
            timelines,
            arrival_interval: config.arrival_interval(),
        }
    }

    /// A client on the same shelves, for inspection while the run is in flight.
    ///
    /// Once [`run`](Self::run) returns the actor is stopped and every request on this
    /// client fails with `ActorClosed`.
    pub fn client(&self) -> ShelfClient {
        self.client.clone()
    }

    pub fn phase(&self) -> RunPhase {
        *self.phase.borrow()
    }

    /// Follows the phase across the run. The channel closes when `run` returns.
    pub fn phases(&self) -> watch::Receiver<RunPhase> {
        self.phase.subscribe()
    }

    /// Feeds `source` into the kitchen and drives the run until it drains.
    ///
    /// # Errors
    ///
    /// Any timeline failure (an expired pickup, an invariant violation reported by the
    /// shelves, a lost actor) ends the run early. A clean drain that fails the final
    /// checks is reported as `InvariantViolation`.
    pub async fn run<S>(mut self, source: S) -> Result<Summary, KitchenError>
    where
        S: OrderSource + 'static,
    {
        let arrivals = ArrivalFeed::new(source, self.client.clone(), self.arrival_interval);
        self.timelines
            .spawn(async move { (Timeline::Arrivals, arrivals.run().await) });

        let outcome = match self.drive().await {
            Ok(()) => self.finish().await,
            Err(e) => Err(e),
        };
        if let Err(e) = &outcome {
            error!(error = %e, "Run aborted");
            self.phase.send_replace(RunPhase::Done);
            self.timelines.shutdown().await;
        }

        // Clones handed out by `client()` may still be alive, so stop the actor by request.
        if let Err(e) = self.client.shutdown().await {
            debug!(error = %e, "Shelf actor already stopped");
        }
        self.actor.await?;
        outcome
    }

    async fn drive(&mut self) -> Result<(), KitchenError> {
        let mut held = self.client.held_orders();

        loop {
            let phase = *self.phase.borrow();
            tokio::select! {
                Some(joined) = self.timelines.join_next() => {
                    let (timeline, result) = joined?;
                    let count = result?;
                    match timeline {
                        Timeline::Arrivals => {
                            info!(submitted = count, "Arrival stream closed, draining");
                            self.phase.send_replace(RunPhase::Draining);
                        }
                        other => {
                            return Err(KitchenError::TaskFailed(format!(
                                "{other} stopped before the shelves drained"
                            )));
                        }
                    }
                }
                drained = async { held.wait_for(|held| *held == 0).await.map(|_| ()) },
                    if phase == RunPhase::Draining =>
                {
                    drained.map_err(|_| FrameworkError::ActorClosed)?;
                    return Ok(());
                }
                else => {
                    return Err(KitchenError::TaskFailed("no timeline left to drive the run".to_string()));
                }
            }
        }
    }

    async fn finish(&mut self) -> Result<Summary, KitchenError> {
        self.phase.send_replace(RunPhase::Done);
        info!("Shelves drained, stopping timelines");

        while let Some(joined) = self.timelines.join_next().await {
            let (timeline, result) = joined?;
            let count = result?;
            info!(%timeline, count, "Timeline stopped");
        }

        let summary = self.client.summary().await?;
        summary.check_drained()?;
        info!(
            total = summary.total_orders_seen,
            delivered = summary.delivered,
            expired = summary.expired_discards,
            discarded = summary.capacity_discards,
            "Run complete"
        );
        Ok(summary)
    }
}
