//! Actor plumbing around the shelves.
//!
//! This module provides the building blocks that serialize every shelf operation through
//! one task instead of a shared lock.
//!
//! # Main Components
//!
//! - [`ShelfActor`] - Owns the [`ShelfStore`](crate::kitchen::ShelfStore) and processes requests sequentially
//! - [`ShelfClient`] - Cloneable async handle used by every timeline
//! - [`ShelfRequest`] - The messages between them
//! - [`FrameworkError`] - Channel failures
//!
//! # Testing
//!
//! See [`mock`] for a scripted client that needs no running actor.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::{ShelfActor, ShelfContext};
pub use client::ShelfClient;
pub use error::FrameworkError;
pub use message::{Response, ShelfRequest};
