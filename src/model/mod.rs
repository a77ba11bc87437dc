//! Pure data: orders, temperature classes and shelves.

pub mod order;
pub mod shelf;

pub use order::*;
pub use shelf::*;
