//! # Shelf Actor
//!
//! The `ShelfActor` is the *server* side of the kitchen. It owns the [`ShelfStore`] and
//! processes [`ShelfRequest`]s one at a time, so placement, decay and pickup are atomic
//! with respect to one another without a lock around the store.

use crate::framework::{ShelfClient, ShelfRequest};
use crate::kitchen::{KitchenEvent, ShelfStore};
use crate::model::ShelfCapacities;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument, warn};

/// Dependencies injected into the actor when it starts running.
#[derive(Debug, Clone, Default)]
pub struct ShelfContext {
    /// Where kitchen events are reported. `None` keeps them in the log only.
    pub events: Option<mpsc::UnboundedSender<KitchenEvent>>,
}

impl ShelfContext {
    pub fn with_events(events: mpsc::UnboundedSender<KitchenEvent>) -> Self {
        Self {
            events: Some(events),
        }
    }

    fn report(&self, event: KitchenEvent) {
        debug!(?event, "Kitchen event");
        if let Some(events) = &self.events {
            // A reporter that went away only loses notifications.
            let _ = events.send(event);
        }
    }
}

/// The actor that owns the shelves.
///
/// After every state change it publishes the number of held orders on a `watch` channel,
/// which lets the coordinator wait for the shelves to drain without polling.
pub struct ShelfActor {
    receiver: mpsc::Receiver<ShelfRequest>,
    store: ShelfStore,
    held: watch::Sender<usize>,
}

impl ShelfActor {
    /// Creates a new `ShelfActor` and its associated [`ShelfClient`].
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    /// * `capacities` - Slots on each of the four shelves.
    /// * `overflow_multiplier` - How much faster overflow ages an order.
    pub fn new(
        buffer_size: usize,
        capacities: ShelfCapacities,
        overflow_multiplier: f64,
    ) -> (Self, ShelfClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (held, held_rx) = watch::channel(0);
        let actor = Self {
            receiver,
            store: ShelfStore::new(capacities, overflow_multiplier),
            held,
        };
        (actor, ShelfClient::new(sender, held_rx))
    }

    /// Runs the actor's event loop until a `Shutdown` request arrives or every client is
    /// dropped.
    #[instrument(name = "shelves", skip_all)]
    pub async fn run(mut self, context: ShelfContext) {
        info!("Shelf actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ShelfRequest::Place { order, respond_to } => {
                    let arrived = KitchenEvent::Arrived {
                        order: order.clone(),
                    };
                    log_event(&arrived);
                    context.report(arrived);
                    let result = self.store.place(order);
                    match &result {
                        Ok(placement) => {
                            for event in placement.events() {
                                log_event(&event);
                                context.report(event);
                            }
                        }
                        Err(e) => error!(error = %e, "Place failed"),
                    }
                    self.publish_held();
                    let _ = respond_to.send(result);
                }
                ShelfRequest::Tick { respond_to } => {
                    let result = self.store.tick();
                    match &result {
                        Ok(expired) => {
                            debug!(expired = expired.len(), held = self.store.held(), "Tick");
                            for order in expired {
                                let event = KitchenEvent::Expired {
                                    order: order.clone(),
                                };
                                log_event(&event);
                                context.report(event);
                            }
                            if !expired.is_empty() {
                                let status = KitchenEvent::ShelfStatus {
                                    shelves: self.store.levels(),
                                };
                                log_event(&status);
                                context.report(status);
                            }
                        }
                        Err(e) => error!(error = %e, "Tick failed"),
                    }
                    self.publish_held();
                    let _ = respond_to.send(result);
                }
                ShelfRequest::Pickup { respond_to } => {
                    let result = self.store.pickup();
                    match &result {
                        Ok(Some(order)) => {
                            let event = KitchenEvent::PickedUp {
                                order: order.clone(),
                            };
                            log_event(&event);
                            context.report(event);
                        }
                        Ok(None) => {
                            log_event(&KitchenEvent::NothingToPickUp);
                            context.report(KitchenEvent::NothingToPickUp);
                        }
                        Err(e) => error!(error = %e, "Pickup failed"),
                    }
                    self.publish_held();
                    let _ = respond_to.send(result);
                }
                ShelfRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.levels()));
                }
                ShelfRequest::Summary { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.summary()));
                }
                ShelfRequest::Shutdown { respond_to } => {
                    let _ = respond_to.send(Ok(()));
                    break;
                }
            }
        }

        info!(held = self.store.held(), "Shutdown");
    }

    // Published before the reply so a caller never observes a stale count.
    fn publish_held(&self) {
        self.held.send_replace(self.store.held());
    }
}

fn log_event(event: &KitchenEvent) {
    match event {
        KitchenEvent::Arrived { order } => info!(order_id = %order.id, temp = %order.temp, "Arrived"),
        KitchenEvent::Placed { order, shelf } => {
            info!(order_id = %order.id, %shelf, value = order.freshness_ratio(), "Placed")
        }
        KitchenEvent::Promoted { order, to } => info!(order_id = %order.id, %to, "Promoted"),
        KitchenEvent::Discarded { order } => {
            warn!(order_id = %order.id, remaining = order.remaining_shelf_life(), "Discarded for lack of space")
        }
        KitchenEvent::PickedUp { order } => {
            info!(order_id = %order.id, value = order.freshness_ratio(), "Picked up")
        }
        KitchenEvent::NothingToPickUp => info!("Nothing to pick up"),
        KitchenEvent::Expired { order } => warn!(order_id = %order.id, "Expired"),
        KitchenEvent::ShelfStatus { shelves } => {
            for level in shelves {
                debug!(shelf = %level.shelf, held = level.held, free = level.free, "Shelf status");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::FrameworkError;
    use crate::kitchen::KitchenError;
    use crate::model::{Order, Shelf, Temperature};

    fn start(events: mpsc::UnboundedSender<KitchenEvent>) -> (ShelfClient, tokio::task::JoinHandle<()>) {
        let (actor, client) = ShelfActor::new(8, ShelfCapacities::default(), 2.0);
        let handle = tokio::spawn(actor.run(ShelfContext::with_events(events)));
        (client, handle)
    }

    #[tokio::test]
    async fn test_shutdown_stops_actor_with_clients_alive() {
        let (events, _rx) = mpsc::unbounded_channel();
        let (client, handle) = start(events);
        let bystander = client.clone();

        client.shutdown().await.unwrap();
        handle.await.unwrap();

        assert!(matches!(
            bystander.pickup().await,
            Err(KitchenError::Framework(FrameworkError::ActorClosed))
        ));
    }

    #[tokio::test]
    async fn test_expiry_sweep_reports_shelf_status() {
        let (events, mut rx) = mpsc::unbounded_channel();
        let (client, handle) = start(events);

        let soup = Order::new("s1", "Tomato Soup", Temperature::Hot, 1.0, 2.0).unwrap();
        let salad = Order::new("s2", "Caesar", Temperature::Cold, 50.0, 1.0).unwrap();
        client.place(soup).await.unwrap();
        client.place(salad).await.unwrap();
        assert_eq!(client.tick().await.unwrap().len(), 1);
        client.shutdown().await.unwrap();
        handle.await.unwrap();

        let mut reported = Vec::new();
        while let Ok(event) = rx.try_recv() {
            reported.push(event);
        }
        let Some(KitchenEvent::ShelfStatus { shelves }) = reported.last() else {
            panic!("expected shelf status last, got {reported:?}");
        };
        assert!(matches!(
            reported[reported.len() - 2],
            KitchenEvent::Expired { ref order } if order.id.0 == "s1"
        ));
        assert_eq!(shelves[Shelf::Hot.index()].held, 0);
        assert_eq!(shelves[Shelf::Cold.index()].held, 1);
        assert_eq!(shelves[Shelf::Cold.index()].free, 9);
    }

    #[tokio::test]
    async fn test_sweep_without_expiry_reports_no_status() {
        let (events, mut rx) = mpsc::unbounded_channel();
        let (client, handle) = start(events);

        let salad = Order::new("s2", "Caesar", Temperature::Cold, 50.0, 1.0).unwrap();
        client.place(salad).await.unwrap();
        client.tick().await.unwrap();
        client.shutdown().await.unwrap();
        handle.await.unwrap();

        while let Ok(event) = rx.try_recv() {
            assert!(!matches!(event, KitchenEvent::ShelfStatus { .. }));
        }
    }
}
