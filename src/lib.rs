//! # Kitchen Shelves
//!
//! > **A real-time simulation of a kitchen's order-holding shelves.**
//!
//! Orders arrive at a steady rate, age on their shelves, and are taken out by couriers
//! who show up at random. Shelves are small, so the interesting part is what happens when
//! they fill up: which order moves, which one is thrown away, and which one a courier
//! gets.
//!
//! ## 🏗️ Design
//!
//! ### One owner for the shelves
//! All shelf state lives in a single [`ShelfStore`](kitchen::ShelfStore) owned by one
//! [`ShelfActor`](framework::ShelfActor) task. Placement, the decay sweep and pickups are
//! messages on its channel, so each one runs to completion before the next starts. No
//! lock, no partially updated shelf.
//!
//! ### Three independent timelines
//! - **Arrivals** post one order per arrival interval until the order source ends.
//! - **Decay** sweeps the shelves once per period; overflow ages orders faster.
//! - **Couriers** wait a random interval, then take the order closest to expiry.
//!
//! Their relative timing is left to the scheduler; that interleaving is the simulation.
//!
//! ### Errors are values
//! Bad input, broken invariants and expired pickups are [`KitchenError`](kitchen::KitchenError)
//! values. The core never aborts the process; [`KitchenSystem`](lifecycle::KitchenSystem)
//! ends the run and hands the error back.
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`] - orders, temperature classes, shelves and capacities
//! - [`kitchen`] - the shelf store: placement, promotion, eviction, decay, pickup
//! - [`framework`] - the shelf actor, its client, and a scripted mock for tests
//! - [`actors`] - the arrival, decay and courier timelines
//! - [`lifecycle`] - the run loop (`Running → Draining → Done`) and tracing setup
//! - [`config`] - rates, capacities and intervals
//! - [`source`] - loading the orders file
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run -- --orders-file orders.json --arrival-rate 2
//! ```

pub mod actors;
pub mod config;
pub mod framework;
pub mod kitchen;
pub mod lifecycle;
pub mod model;
pub mod source;
