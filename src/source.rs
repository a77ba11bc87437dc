//! Loading the orders file.
//!
//! The file is a JSON array of records shaped like
//! `{"id": "...", "name": "...", "temp": "hot", "shelfLife": 300, "decayRate": 0.45}`.
//! Every record is validated before anything touches the shelves, so one bad record
//! rejects the whole run.

use crate::kitchen::KitchenError;
use crate::model::{Order, OrderSeed};
use std::path::Path;
use tracing::info;

pub fn load_orders(path: impl AsRef<Path>) -> Result<Vec<Order>, KitchenError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let orders = parse_orders(&raw)?;
    info!(path = %path.display(), count = orders.len(), "Loaded orders");
    Ok(orders)
}

pub fn parse_orders(json: &str) -> Result<Vec<Order>, KitchenError> {
    let seeds: Vec<OrderSeed> = serde_json::from_str(json)?;
    seeds.into_iter().map(OrderSeed::into_order).collect()
}
