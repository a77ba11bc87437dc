//! The decay scheduler: one sweep of the shelves per decay period.

use crate::framework::ShelfClient;
use crate::kitchen::KitchenError;
use crate::lifecycle::RunPhase;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{info, instrument};

pub struct DecayScheduler {
    client: ShelfClient,
    period: Duration,
    phase: watch::Receiver<RunPhase>,
}

impl DecayScheduler {
    pub fn new(client: ShelfClient, period: Duration, phase: watch::Receiver<RunPhase>) -> Self {
        Self {
            client,
            period,
            phase,
        }
    }

    /// Ticks until the run reaches [`RunPhase::Done`]. Returns the number of sweeps.
    #[instrument(name = "decay", skip_all)]
    pub async fn run(mut self) -> Result<usize, KitchenError> {
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut sweeps = 0;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.client.tick().await?;
                    sweeps += 1;
                }
                _ = async { self.phase.wait_for(|phase| *phase == RunPhase::Done).await.map(|_| ()) } => break,
            }
        }

        info!(sweeps, "Decay scheduler stopped");
        Ok(sweeps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockShelf;

    #[tokio::test(start_paused = true)]
    async fn test_one_sweep_per_period_until_done() {
        let mut mock = MockShelf::new();
        for _ in 0..3 {
            mock.expect_tick().return_ok(Vec::new());
        }

        let (phase_tx, phase_rx) = watch::channel(RunPhase::Running);
        let scheduler = DecayScheduler::new(mock.client(), Duration::from_secs(1), phase_rx);
        let handle = tokio::spawn(scheduler.run());

        tokio::time::sleep(Duration::from_millis(3_500)).await;
        phase_tx.send_replace(RunPhase::Done);

        assert_eq!(handle.await.unwrap().unwrap(), 3);
        mock.verify();
    }
}
