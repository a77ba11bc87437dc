//! # Mock Shelves
//!
//! [`MockShelf`] hands out a real [`ShelfClient`] whose requests are answered from a
//! script instead of a [`ShelfStore`](crate::kitchen::ShelfStore). Use it to drive a
//! timeline (courier, decay, arrival) into states the real store never reaches, such as
//! handing an expired order to a courier.
//!
//! | | MockShelf | Real ShelfActor |
//! |---|---|---|
//! | **State** | None (scripted replies) | Real shelves |
//! | **Determinism** | Complete | Subject to scheduler |
//! | **Error injection** | `return_err` | Requires a broken store |
//!
//! ```rust
//! use kitchen_shelves::framework::mock::MockShelf;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockShelf::new();
//!     mock.expect_pickup().return_ok(None);
//!
//!     let client = mock.client();
//!     assert!(client.pickup().await.unwrap().is_none());
//!     mock.verify();
//! }
//! ```

use crate::framework::{ShelfClient, ShelfRequest};
use crate::kitchen::{KitchenError, Placement};
use crate::model::Order;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, watch};

enum Expectation {
    Place(Result<Placement, KitchenError>),
    Tick(Result<Vec<Order>, KitchenError>),
    Pickup(Result<Option<Order>, KitchenError>),
}

type Expectations = Arc<Mutex<VecDeque<Expectation>>>;

/// A scripted stand-in for the shelf actor.
///
/// Requests must arrive in the order their expectations were registered; a mismatch
/// panics the background task, which surfaces as `ActorDropped` on the client.
/// `Shutdown` needs no expectation and stops the mock.
pub struct MockShelf {
    client: ShelfClient,
    expectations: Expectations,
    held: watch::Sender<usize>,
    _handle: tokio::task::JoinHandle<()>,
}

impl Default for MockShelf {
    fn default() -> Self {
        Self::new()
    }
}

impl MockShelf {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ShelfRequest>(100);
        let (held, held_rx) = watch::channel(0);
        let expectations: Expectations = Arc::new(Mutex::new(VecDeque::new()));
        let script = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                if let ShelfRequest::Shutdown { respond_to } = request {
                    let _ = respond_to.send(Ok(()));
                    break;
                }
                let expectation = script.lock().unwrap().pop_front();
                match (request, expectation) {
                    (ShelfRequest::Place { respond_to, .. }, Some(Expectation::Place(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ShelfRequest::Tick { respond_to }, Some(Expectation::Tick(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ShelfRequest::Pickup { respond_to }, Some(Expectation::Pickup(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (request, _) => panic!("Unexpected request or expectation mismatch: {request:?}"),
                }
            }
        });

        Self {
            client: ShelfClient::new(sender, held_rx),
            expectations,
            held,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ShelfClient {
        self.client.clone()
    }

    /// Publishes a held-order count to every `held_orders()` watcher.
    pub fn set_held(&self, held: usize) {
        self.held.send_replace(held);
    }

    pub fn expect_place(&mut self) -> ExpectationBuilder<Placement> {
        self.builder(Expectation::Place)
    }

    pub fn expect_tick(&mut self) -> ExpectationBuilder<Vec<Order>> {
        self.builder(Expectation::Tick)
    }

    pub fn expect_pickup(&mut self) -> ExpectationBuilder<Option<Order>> {
        self.builder(Expectation::Pickup)
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }

    fn builder<T>(&self, wrap: fn(Result<T, KitchenError>) -> Expectation) -> ExpectationBuilder<T> {
        ExpectationBuilder {
            wrap,
            expectations: self.expectations.clone(),
        }
    }
}

/// Completes an expectation with the reply the mock should give.
pub struct ExpectationBuilder<T> {
    wrap: fn(Result<T, KitchenError>) -> Expectation,
    expectations: Expectations,
}

impl<T> ExpectationBuilder<T> {
    pub fn return_ok(self, value: T) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: KitchenError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T, KitchenError>) {
        self.expectations.lock().unwrap().push_back((self.wrap)(response));
    }
}

/// Creates a client and the receiver its requests land on, for tests that answer
/// requests by hand.
pub fn create_mock_client(buffer_size: usize) -> (ShelfClient, mpsc::Receiver<ShelfRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (_, held_rx) = watch::channel(0);
    (ShelfClient::new(sender, held_rx), receiver)
}
