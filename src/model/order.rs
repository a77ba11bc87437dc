//! The order entity and the seed record it is built from.
//!
//! An [`Order`] carries its identity, its temperature class and the freshness budget it
//! started with. The only state that changes while it sits on a shelf is
//! `remaining_shelf_life` (consumed by the decay sweep) and the shelf it is held on.

use crate::kitchen::KitchenError;
use crate::model::{Shelf, Temperature};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Overflow ages every order twice as fast as a matching single-temperature shelf.
pub const DEFAULT_OVERFLOW_DECAY_MULTIPLIER: f64 = 2.0;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One record of the orders file, exactly as the order source supplies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSeed {
    pub id: String,
    pub name: String,
    pub temp: String,
    #[serde(rename = "shelfLife")]
    pub shelf_life: f64,
    #[serde(rename = "decayRate")]
    pub decay_rate: f64,
}

impl OrderSeed {
    /// Validates the record and turns it into a fresh, unshelved [`Order`].
    pub fn into_order(self) -> Result<Order, KitchenError> {
        let temp = self
            .temp
            .parse::<Temperature>()
            .map_err(|reason| KitchenError::InvalidOrder {
                id: self.id.clone(),
                reason,
            })?;
        Order::new(self.id, self.name, temp, self.shelf_life, self.decay_rate)
    }
}

/// A kitchen order waiting for a courier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub name: String,
    pub temp: Temperature,
    pub initial_shelf_life: f64,
    pub decay_rate: f64,
    pub(crate) remaining_shelf_life: f64,
    pub(crate) shelf: Option<Shelf>,
}

impl Order {
    /// Creates a new Order with its full shelf life and no shelf.
    ///
    /// # Errors
    /// `InvalidOrder` when the shelf life or decay rate is not a positive, finite number.
    pub fn new(
        id: impl Into<OrderId>,
        name: impl Into<String>,
        temp: Temperature,
        shelf_life: f64,
        decay_rate: f64,
    ) -> Result<Self, KitchenError> {
        let id = id.into();
        if !(shelf_life.is_finite() && shelf_life > 0.0) {
            return Err(KitchenError::InvalidOrder {
                id: id.0,
                reason: format!("shelf life must be positive, got {shelf_life}"),
            });
        }
        if !(decay_rate.is_finite() && decay_rate > 0.0) {
            return Err(KitchenError::InvalidOrder {
                id: id.0,
                reason: format!("decay rate must be positive, got {decay_rate}"),
            });
        }
        Ok(Self {
            id,
            name: name.into(),
            temp,
            initial_shelf_life: shelf_life,
            decay_rate,
            remaining_shelf_life: shelf_life,
            shelf: None,
        })
    }

    pub fn remaining_shelf_life(&self) -> f64 {
        self.remaining_shelf_life
    }

    /// The shelf currently holding this order, `None` before placement.
    pub fn shelf(&self) -> Option<Shelf> {
        self.shelf
    }

    /// Remaining freshness as a fraction of the initial budget. Diagnostic only.
    pub fn freshness_ratio(&self) -> f64 {
        self.remaining_shelf_life / self.initial_shelf_life
    }

    /// Shelf life consumed by one decay tick where the order currently sits.
    pub fn effective_decay_per_tick(&self, overflow_multiplier: f64) -> f64 {
        match self.shelf {
            Some(Shelf::Overflow) => self.decay_rate * overflow_multiplier,
            _ => self.decay_rate,
        }
    }

    /// Ticks left before the order expires at its current decay rate.
    pub fn time_to_expiry(&self, overflow_multiplier: f64) -> f64 {
        self.remaining_shelf_life / self.effective_decay_per_tick(overflow_multiplier)
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_shelf_life <= 0.0
    }
}

impl Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, {}) value={:.3}",
            self.id,
            self.name,
            self.temp,
            self.freshness_ratio()
        )
    }
}
