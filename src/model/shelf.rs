//! Temperature classes, the four fixed shelves and their capacities.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Storage temperature an order requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperature {
    Hot,
    Cold,
    Frozen,
}

impl Temperature {
    /// The single-temperature shelf this class prefers.
    pub fn shelf(self) -> Shelf {
        match self {
            Temperature::Hot => Shelf::Hot,
            Temperature::Cold => Shelf::Cold,
            Temperature::Frozen => Shelf::Frozen,
        }
    }
}

impl FromStr for Temperature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hot" => Ok(Temperature::Hot),
            "cold" => Ok(Temperature::Cold),
            "frozen" => Ok(Temperature::Frozen),
            other => Err(format!("unknown temperature class {other:?}")),
        }
    }
}

impl Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Temperature::Hot => "hot",
            Temperature::Cold => "cold",
            Temperature::Frozen => "frozen",
        };
        f.write_str(name)
    }
}

/// One of the four holding areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shelf {
    Hot,
    Cold,
    Frozen,
    Overflow,
}

impl Shelf {
    /// Scan order for every cross-shelf search; earlier shelves win ties.
    pub const ALL: [Shelf; 4] = [Shelf::Hot, Shelf::Cold, Shelf::Frozen, Shelf::Overflow];

    pub(crate) fn index(self) -> usize {
        match self {
            Shelf::Hot => 0,
            Shelf::Cold => 1,
            Shelf::Frozen => 2,
            Shelf::Overflow => 3,
        }
    }
}

impl Display for Shelf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Shelf::Hot => "hot",
            Shelf::Cold => "cold",
            Shelf::Frozen => "frozen",
            Shelf::Overflow => "overflow",
        };
        f.write_str(name)
    }
}

/// Maximum number of orders each shelf may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelfCapacities {
    pub hot: usize,
    pub cold: usize,
    pub frozen: usize,
    pub overflow: usize,
}

impl Default for ShelfCapacities {
    fn default() -> Self {
        Self {
            hot: 10,
            cold: 10,
            frozen: 10,
            overflow: 15,
        }
    }
}

impl ShelfCapacities {
    pub fn of(&self, shelf: Shelf) -> usize {
        match shelf {
            Shelf::Hot => self.hot,
            Shelf::Cold => self.cold,
            Shelf::Frozen => self.frozen,
            Shelf::Overflow => self.overflow,
        }
    }

    pub fn total(&self) -> usize {
        self.hot + self.cold + self.frozen + self.overflow
    }
}
