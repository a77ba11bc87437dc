//! # Timelines
//!
//! The three independent actors that drive the shelves:
//!
//! - [`ArrivalFeed`] - posts orders at a fixed rate until its [`OrderSource`] ends
//! - [`DecayScheduler`] - sweeps the shelves once per decay period
//! - [`CourierFeed`] - asks for an order after each wait drawn from a [`PickupSchedule`]
//!
//! Each holds its own [`ShelfClient`](crate::framework::ShelfClient); their relative
//! timing is deliberately left to the scheduler.

pub mod arrival;
pub mod courier;
pub mod decay;
pub mod source;

pub use arrival::ArrivalFeed;
pub use courier::CourierFeed;
pub use decay::DecayScheduler;
pub use source::*;
