//! Simulation settings.
//!
//! Every field has a default, so an empty JSON object (or no file at all) yields the
//! standard kitchen: 10/10/10 single-temperature slots, 15 overflow slots, two orders a
//! second, couriers every 2 to 6 seconds and a one-second decay tick.

use crate::kitchen::KitchenError;
use crate::model::{ShelfCapacities, DEFAULT_OVERFLOW_DECAY_MULTIPLIER};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitchenConfig {
    /// Orders submitted per second.
    pub arrival_rate: f64,
    pub capacities: ShelfCapacities,
    pub pickup_interval: PickupInterval,
    /// Wall-clock length of one decay tick.
    pub decay_period_secs: f64,
    pub overflow_decay_multiplier: f64,
    /// Queue depth of the shelf actor's request channel.
    pub channel_buffer: usize,
}

/// Bounds, in whole seconds, of the wait before each courier arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupInterval {
    pub lower_secs: u64,
    pub upper_secs: u64,
}

impl Default for PickupInterval {
    fn default() -> Self {
        Self {
            lower_secs: 2,
            upper_secs: 6,
        }
    }
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            arrival_rate: 2.0,
            capacities: ShelfCapacities::default(),
            pickup_interval: PickupInterval::default(),
            decay_period_secs: 1.0,
            overflow_decay_multiplier: DEFAULT_OVERFLOW_DECAY_MULTIPLIER,
            channel_buffer: 32,
        }
    }
}

impl KitchenConfig {
    /// Loads a JSON config file; missing fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, KitchenError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), KitchenError> {
        if !(self.arrival_rate.is_finite() && self.arrival_rate > 0.0) {
            return Err(KitchenError::InvalidConfig(format!(
                "arrival rate must be positive, got {}",
                self.arrival_rate
            )));
        }
        if self.pickup_interval.lower_secs > self.pickup_interval.upper_secs {
            return Err(KitchenError::InvalidConfig(format!(
                "pickup interval lower bound {} exceeds upper bound {}",
                self.pickup_interval.lower_secs, self.pickup_interval.upper_secs
            )));
        }
        if !(self.decay_period_secs.is_finite() && self.decay_period_secs > 0.0) {
            return Err(KitchenError::InvalidConfig(format!(
                "decay period must be positive, got {}",
                self.decay_period_secs
            )));
        }
        if !(self.overflow_decay_multiplier.is_finite() && self.overflow_decay_multiplier >= 1.0) {
            return Err(KitchenError::InvalidConfig(format!(
                "overflow decay multiplier must be at least 1, got {}",
                self.overflow_decay_multiplier
            )));
        }
        if self.channel_buffer == 0 {
            return Err(KitchenError::InvalidConfig(
                "channel buffer must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Wait between two submitted orders.
    pub fn arrival_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.arrival_rate)
    }

    pub fn decay_period(&self) -> Duration {
        Duration::from_secs_f64(self.decay_period_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_standard_kitchen() {
        let config = KitchenConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.arrival_interval(), Duration::from_millis(500));
        assert_eq!(config.decay_period(), Duration::from_secs(1));
        assert_eq!(config.capacities.overflow, 15);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: KitchenConfig =
            serde_json::from_str(r#"{"arrival_rate": 4, "pickup_interval": {"upper_secs": 3}}"#)
                .unwrap();
        assert_eq!(config.arrival_rate, 4.0);
        assert_eq!(config.pickup_interval.lower_secs, 2);
        assert_eq!(config.pickup_interval.upper_secs, 3);
        assert_eq!(config.capacities, ShelfCapacities::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = KitchenConfig::default();
        config.arrival_rate = 0.0;
        assert!(matches!(config.validate(), Err(KitchenError::InvalidConfig(_))));

        let mut config = KitchenConfig::default();
        config.pickup_interval = PickupInterval {
            lower_secs: 5,
            upper_secs: 1,
        };
        assert!(config.validate().is_err());

        let mut config = KitchenConfig::default();
        config.overflow_decay_multiplier = 0.5;
        assert!(config.validate().is_err());
    }
}
