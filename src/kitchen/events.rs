//! Observable kitchen events, handed to the reporting side as plain data.

use crate::kitchen::{Placement, ShelfLevel};
use crate::model::{Order, Shelf};
use serde::Serialize;

/// Something that happened on the shelves.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum KitchenEvent {
    Arrived { order: Order },
    Placed { order: Order, shelf: Shelf },
    Promoted { order: Order, to: Shelf },
    Discarded { order: Order },
    PickedUp { order: Order },
    NothingToPickUp,
    Expired { order: Order },
    /// Occupancy after a decay sweep that removed at least one order.
    ShelfStatus { shelves: [ShelfLevel; 4] },
}

impl Placement {
    /// The events describing this placement, in the order they happened.
    pub fn events(&self) -> Vec<KitchenEvent> {
        match self {
            Placement::Placed { order } => vec![placed(order)],
            Placement::Promoted { promoted, placed: order } => vec![
                KitchenEvent::Promoted {
                    order: promoted.clone(),
                    to: promoted.temp.shelf(),
                },
                placed(order),
            ],
            Placement::Evicted { discarded, placed: order } => vec![
                KitchenEvent::Discarded {
                    order: discarded.clone(),
                },
                placed(order),
            ],
            Placement::Rejected { discarded } => vec![KitchenEvent::Discarded {
                order: discarded.clone(),
            }],
        }
    }
}

fn placed(order: &Order) -> KitchenEvent {
    KitchenEvent::Placed {
        order: order.clone(),
        shelf: order.shelf().unwrap_or(Shelf::Overflow),
    }
}
