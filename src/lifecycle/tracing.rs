//! # Observability & Tracing
//!
//! Structured logging for the whole kitchen via the `tracing` crate.
//!
//! ## Configuration
//!
//! Log levels come from the `RUST_LOG` environment variable. The compact format hides
//! the module path (`with_target(false)`) and shows spans inline, so every line carries
//! the task it came from (`shelves`, `arrivals`, `decay`, `couriers`).
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: startup and shutdown of the shelf actor
//! - **Shelf events**: placement, promotion, discards, pickups and expiry, with
//!   `order_id`, `shelf` and freshness as structured fields
//! - **Run phases**: end of the arrival stream, drain, final counters
//! - **Errors**: invariant violations and expired pickups
//!
//! ## Usage Examples
//!
//! ```bash
//! # Shelf events and run phases
//! RUST_LOG=info cargo run -- --orders-file orders.json
//!
//! # Every request and full event payloads
//! RUST_LOG=debug cargo run -- --orders-file orders.json
//!
//! # Only the shelf actor
//! RUST_LOG=kitchen_shelves::framework=debug cargo run -- --orders-file orders.json
//! ```
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO shelves: Placed order_id=a8cfcb76 shelf=hot value=1.0
//! INFO shelves: Promoted order_id=58e9b5fe to=frozen
//! WARN shelves: Expired order_id=2ec069e3
//! INFO shelves: Picked up order_id=690b85f7 value=0.82
//! INFO couriers: Courier took order order_id=690b85f7
//! INFO Arrival stream closed, draining submitted=132
//! ```

/// Initializes the tracing/logging infrastructure for the application.
///
/// Call once, at the start of `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
