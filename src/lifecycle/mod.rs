//! # Run Lifecycle
//!
//! Starting, wiring and stopping the kitchen.
//!
//! ## The Orchestration Pattern
//!
//! The shelf actor and the timelines are each simple; the coordination between them
//! lives here. [`KitchenSystem`]:
//!
//! 1. **Creates** the [`ShelfActor`](crate::framework::ShelfActor) and hands a client
//!    clone to every timeline
//! 2. **Injects** the reporting channel through [`ShelfContext`](crate::framework::ShelfContext)
//! 3. **Tracks** the run phase and broadcasts it on a `watch` channel
//! 4. **Shuts down** by signalling `Done`, joining the timelines, then dropping the last
//!    client so the actor's loop ends
//!
//! ## Observability
//!
//! [`setup_tracing`] installs the subscriber; see [`tracing`] for what gets logged.

pub mod kitchen_system;
pub mod tracing;

pub use kitchen_system::*;
pub use tracing::*;
