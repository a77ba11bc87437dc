//! # Framework Errors
//!
//! Failures of the channel plumbing between a [`ShelfClient`](crate::framework::ShelfClient)
//! and the [`ShelfActor`](crate::framework::ShelfActor), as opposed to failures of the
//! shelf logic itself.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
}
