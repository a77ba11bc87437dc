//! Collaborator seams: where orders come from and when couriers show up.

use crate::config::PickupInterval;
use crate::model::Order;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::sync::mpsc;

/// A stream of validated orders. `None` marks the end of the stream.
#[async_trait]
pub trait OrderSource: Send {
    async fn next_order(&mut self) -> Option<Order>;
}

/// Orders loaded up front, handed out in file order.
pub struct VecSource {
    orders: std::vec::IntoIter<Order>,
}

impl VecSource {
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders: orders.into_iter(),
        }
    }
}

#[async_trait]
impl OrderSource for VecSource {
    async fn next_order(&mut self) -> Option<Order> {
        self.orders.next()
    }
}

/// A live feed: the stream ends when every sender is dropped.
#[async_trait]
impl OrderSource for mpsc::Receiver<Order> {
    async fn next_order(&mut self) -> Option<Order> {
        self.recv().await
    }
}

/// Decides how long the next courier takes to arrive.
pub trait PickupSchedule: Send {
    fn next_interval(&mut self) -> Duration;
}

/// Uniformly random whole seconds within `[lower, upper]`.
pub struct UniformSchedule {
    rng: StdRng,
    interval: PickupInterval,
}

impl UniformSchedule {
    pub fn new(interval: PickupInterval) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            interval,
        }
    }

    /// Reproducible sequence of intervals.
    pub fn seeded(interval: PickupInterval, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            interval,
        }
    }
}

impl PickupSchedule for UniformSchedule {
    fn next_interval(&mut self) -> Duration {
        let secs = self
            .rng
            .gen_range(self.interval.lower_secs..=self.interval.upper_secs);
        Duration::from_secs(secs)
    }
}

/// The same wait before every courier.
pub struct FixedSchedule(pub Duration);

impl PickupSchedule for FixedSchedule {
    fn next_interval(&mut self) -> Duration {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Temperature;

    #[test]
    fn test_uniform_schedule_stays_in_bounds() {
        let interval = PickupInterval {
            lower_secs: 2,
            upper_secs: 6,
        };
        let mut schedule = UniformSchedule::seeded(interval, 7);
        for _ in 0..200 {
            let wait = schedule.next_interval();
            assert!(wait >= Duration::from_secs(2) && wait <= Duration::from_secs(6));
        }
    }

    #[test]
    fn test_seeded_schedules_repeat() {
        let interval = PickupInterval::default();
        let mut a = UniformSchedule::seeded(interval, 42);
        let mut b = UniformSchedule::seeded(interval, 42);
        let first: Vec<_> = (0..10).map(|_| a.next_interval()).collect();
        let second: Vec<_> = (0..10).map(|_| b.next_interval()).collect();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_channel_source_ends_when_senders_drop() {
        let (tx, mut rx) = mpsc::channel(2);
        tx.send(Order::new("a", "Soup", Temperature::Hot, 5.0, 1.0).unwrap())
            .await
            .unwrap();
        drop(tx);

        assert_eq!(rx.next_order().await.map(|o| o.id.0), Some("a".to_string()));
        assert!(rx.next_order().await.is_none());
    }
}
