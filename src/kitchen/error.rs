//! Error types for the kitchen.

use crate::framework::FrameworkError;
use crate::model::OrderId;
use thiserror::Error;

/// Everything that can stop a simulation run.
///
/// None of these are retried: bad input is rejected before the run starts, and the
/// remaining variants mean the run can no longer be trusted.
#[derive(Debug, Error)]
pub enum KitchenError {
    /// An order record failed validation (unknown temperature, non-positive life or rate).
    #[error("Invalid order {id}: {reason}")]
    InvalidOrder { id: String, reason: String },

    /// The configuration cannot describe a runnable kitchen.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Shelf bookkeeping disagrees with what is actually held.
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    /// A courier received an order that should already have been discarded.
    #[error("Expired order {id} handed to courier (remaining shelf life {remaining})")]
    ExpiredPickup { id: OrderId, remaining: f64 },

    /// The shelf actor could not be reached.
    #[error("Actor communication error: {0}")]
    Framework(#[from] FrameworkError),

    /// A timeline task panicked or was cancelled.
    #[error("Task failed: {0}")]
    TaskFailed(String),

    #[error("Failed to read orders: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse orders: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<tokio::task::JoinError> for KitchenError {
    fn from(e: tokio::task::JoinError) -> Self {
        KitchenError::TaskFailed(e.to_string())
    }
}
