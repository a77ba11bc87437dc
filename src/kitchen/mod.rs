//! # Kitchen
//!
//! The shelf-management engine: placement, promotion and eviction under capacity
//! pressure, the decay sweep, and courier pickup.
//!
//! ## Structure
//!
//! - [`store`] - [`ShelfStore`], the four shelves and their counters
//! - [`events`] - [`KitchenEvent`], what the store reports to the outside
//! - [`error`] - [`KitchenError`] for type-safe error handling

pub mod error;
pub mod events;
pub mod store;

pub use error::*;
pub use events::*;
pub use store::*;
