//! The arrival feed: submits one order per arrival interval until the source runs dry.

use crate::actors::OrderSource;
use crate::framework::ShelfClient;
use crate::kitchen::KitchenError;
use std::time::Duration;
use tracing::{debug, info, instrument};

pub struct ArrivalFeed<S> {
    source: S,
    client: ShelfClient,
    interval: Duration,
}

impl<S: OrderSource> ArrivalFeed<S> {
    pub fn new(source: S, client: ShelfClient, interval: Duration) -> Self {
        Self {
            source,
            client,
            interval,
        }
    }

    /// Posts every order, waiting `interval` before each one. Returns how many were
    /// submitted once the source signals the end of the stream.
    ///
    /// Submission blocks only on the actor's request queue; a full kitchen is resolved
    /// by the placement policy, never by holding the producer back.
    #[instrument(name = "arrivals", skip_all)]
    pub async fn run(mut self) -> Result<usize, KitchenError> {
        let mut submitted = 0;
        while let Some(order) = self.source.next_order().await {
            tokio::time::sleep(self.interval).await;
            debug!(order_id = %order.id, "Posting order");
            self.client.place(order).await?;
            submitted += 1;
        }
        info!(submitted, "All orders posted");
        Ok(submitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::VecSource;
    use crate::framework::mock::MockShelf;
    use crate::kitchen::Placement;
    use crate::model::{Order, Temperature};

    fn order(id: &str) -> Order {
        Order::new(id, "Kale Salad", Temperature::Cold, 20.0, 1.0).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_posts_every_order_at_the_arrival_rate() {
        let mut mock = MockShelf::new();
        mock.expect_place().return_ok(Placement::Placed { order: order("a") });
        mock.expect_place().return_ok(Placement::Placed { order: order("b") });

        let started = tokio::time::Instant::now();
        let feed = ArrivalFeed::new(
            VecSource::new(vec![order("a"), order("b")]),
            mock.client(),
            Duration::from_millis(500),
        );

        assert_eq!(feed.run().await.unwrap(), 2);
        assert!(started.elapsed() >= Duration::from_secs(1));
        mock.verify();
    }

    #[tokio::test(start_paused = true)]
    async fn test_placement_failure_stops_the_feed() {
        let mut mock = MockShelf::new();
        mock.expect_place()
            .return_err(KitchenError::InvariantViolation("hot shelf over capacity".into()));

        let feed = ArrivalFeed::new(
            VecSource::new(vec![order("a"), order("b")]),
            mock.client(),
            Duration::from_millis(500),
        );

        assert!(matches!(
            feed.run().await,
            Err(KitchenError::InvariantViolation(_))
        ));
        mock.verify();
    }
}
