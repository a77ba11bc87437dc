//! The courier feed: after each randomly drawn wait, one courier asks for an order.

use crate::actors::PickupSchedule;
use crate::framework::ShelfClient;
use crate::kitchen::KitchenError;
use crate::lifecycle::RunPhase;
use tokio::sync::watch;
use tracing::{error, info, instrument};

pub struct CourierFeed<P> {
    client: ShelfClient,
    schedule: P,
    phase: watch::Receiver<RunPhase>,
}

impl<P: PickupSchedule> CourierFeed<P> {
    pub fn new(client: ShelfClient, schedule: P, phase: watch::Receiver<RunPhase>) -> Self {
        Self {
            client,
            schedule,
            phase,
        }
    }

    /// Sends couriers until the run reaches [`RunPhase::Done`]. Returns the number of
    /// orders taken out.
    ///
    /// # Errors
    /// `ExpiredPickup` if the shelves ever hand over an order with no shelf life left.
    #[instrument(name = "couriers", skip_all)]
    pub async fn run(mut self) -> Result<usize, KitchenError> {
        let mut delivered = 0;

        loop {
            let wait = self.schedule.next_interval();
            tokio::select! {
                _ = tokio::time::sleep(wait) => {
                    match self.client.pickup().await? {
                        Some(order) if order.is_expired() => {
                            error!(order_id = %order.id, remaining = order.remaining_shelf_life(), "Expired order picked up");
                            return Err(KitchenError::ExpiredPickup {
                                remaining: order.remaining_shelf_life(),
                                id: order.id,
                            });
                        }
                        Some(order) => {
                            info!(order_id = %order.id, "Courier took order");
                            delivered += 1;
                        }
                        None => info!("No order for this courier"),
                    }
                }
                _ = async { self.phase.wait_for(|phase| *phase == RunPhase::Done).await.map(|_| ()) } => break,
            }
        }

        info!(delivered, "Courier feed stopped");
        Ok(delivered)
    }
}
