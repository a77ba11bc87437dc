//! # Shelf Client
//!
//! The type-safe, async API for talking to a [`ShelfActor`](crate::framework::ShelfActor).
//! It forwards requests over a Tokio mpsc channel and awaits replies on oneshot channels.
//! Cloning is cheap (a sender and a watch receiver), so each timeline gets its own copy.

use crate::framework::{FrameworkError, Response, ShelfRequest};
use crate::kitchen::{KitchenError, Placement, ShelfLevel, Summary};
use crate::model::Order;
use tokio::sync::{mpsc, oneshot, watch};

/// A handle on the shelves.
#[derive(Clone)]
pub struct ShelfClient {
    sender: mpsc::Sender<ShelfRequest>,
    held: watch::Receiver<usize>,
}

impl ShelfClient {
    pub fn new(sender: mpsc::Sender<ShelfRequest>, held: watch::Receiver<usize>) -> Self {
        Self { sender, held }
    }

    /// Submits an arriving order. Waits only for the actor to take and answer the request.
    pub async fn place(&self, order: Order) -> Result<Placement, KitchenError> {
        self.request(|respond_to| ShelfRequest::Place { order, respond_to })
            .await
    }

    pub async fn tick(&self) -> Result<Vec<Order>, KitchenError> {
        self.request(|respond_to| ShelfRequest::Tick { respond_to }).await
    }

    /// `Ok(None)` when the shelves are empty.
    pub async fn pickup(&self) -> Result<Option<Order>, KitchenError> {
        self.request(|respond_to| ShelfRequest::Pickup { respond_to })
            .await
    }

    pub async fn snapshot(&self) -> Result<[ShelfLevel; 4], KitchenError> {
        self.request(|respond_to| ShelfRequest::Snapshot { respond_to })
            .await
    }

    pub async fn summary(&self) -> Result<Summary, KitchenError> {
        self.request(|respond_to| ShelfRequest::Summary { respond_to })
            .await
    }

    /// Stops the actor. Requests from any remaining clone fail with `ActorClosed`.
    pub async fn shutdown(&self) -> Result<(), KitchenError> {
        self.request(|respond_to| ShelfRequest::Shutdown { respond_to })
            .await
    }

    /// Number of orders on the shelves, updated after every request the actor handles.
    pub fn held_orders(&self) -> watch::Receiver<usize> {
        self.held.clone()
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(Response<T>) -> ShelfRequest,
    ) -> Result<T, KitchenError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::create_mock_client;

    #[tokio::test]
    async fn test_closed_actor_maps_to_framework_error() {
        let (client, receiver) = create_mock_client(1);
        drop(receiver);

        let result = client.pickup().await;
        assert!(matches!(
            result,
            Err(KitchenError::Framework(FrameworkError::ActorClosed))
        ));
    }

    #[tokio::test]
    async fn test_dropped_responder_maps_to_framework_error() {
        let (client, mut receiver) = create_mock_client(1);

        let task = tokio::spawn(async move { client.tick().await });
        match receiver.recv().await {
            Some(ShelfRequest::Tick { respond_to }) => drop(respond_to),
            other => panic!("Expected Tick request, got {other:?}"),
        }

        let result = task.await.unwrap();
        assert!(matches!(
            result,
            Err(KitchenError::Framework(FrameworkError::ActorDropped))
        ));
    }
}
