//! # Shelf Messages
//!
//! The requests a [`ShelfClient`](crate::framework::ShelfClient) sends to the
//! [`ShelfActor`](crate::framework::ShelfActor). Each one carries a oneshot responder,
//! so the caller awaits exactly one reply per request.

use crate::kitchen::{KitchenError, Placement, ShelfLevel, Summary};
use crate::model::Order;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, KitchenError>>;

/// One operation on the shelves.
///
/// - **Place**: an arriving order, resolved by the placement policy.
/// - **Tick**: one decay sweep; replies with the orders that expired.
/// - **Pickup**: a courier asks for the order closest to expiry.
/// - **Snapshot**: current occupancy of each shelf (read-only).
/// - **Summary**: counters plus occupancy (read-only).
/// - **Shutdown**: stop the actor even while other clients are still alive.
#[derive(Debug)]
pub enum ShelfRequest {
    Place {
        order: Order,
        respond_to: Response<Placement>,
    },
    Tick {
        respond_to: Response<Vec<Order>>,
    },
    Pickup {
        respond_to: Response<Option<Order>>,
    },
    Snapshot {
        respond_to: Response<[ShelfLevel; 4]>,
    },
    Summary {
        respond_to: Response<Summary>,
    },
    Shutdown {
        respond_to: Response<()>,
    },
}
