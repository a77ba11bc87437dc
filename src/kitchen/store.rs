//! # Shelf Store
//!
//! The authoritative state of the four shelves. Every operation here is synchronous and
//! takes `&mut self`; serializing access is the job of the owning
//! [`ShelfActor`](crate::framework::ShelfActor).
//!
//! ## Ranking
//!
//! Placement, eviction and pickup all rank orders by *time to expiry*
//! (`remaining / effective decay per tick`), not by raw remaining life, since an order on
//! overflow burns through its life faster than one on a matching shelf.
//!
//! Ties go to the earliest order scanned: shelves in [`Shelf::ALL`] order, then insertion
//! order within a shelf.

use crate::kitchen::KitchenError;
use crate::model::{Order, Shelf, ShelfCapacities};
use serde::Serialize;

const OVERFLOW: usize = 3;

/// What `place` did with an incoming order.
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    /// Placed on a free slot; `order.shelf()` tells which one.
    Placed { order: Order },
    /// `promoted` moved from overflow to its own shelf to make room for `placed`.
    Promoted { promoted: Order, placed: Order },
    /// `discarded` lost its overflow slot to `placed`.
    Evicted { discarded: Order, placed: Order },
    /// No slot anywhere (overflow has zero capacity): the new order itself is discarded.
    Rejected { discarded: Order },
}

/// Occupancy of one shelf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShelfLevel {
    pub shelf: Shelf,
    pub held: usize,
    pub free: usize,
    pub capacity: usize,
}

/// Lifetime counters of the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    pub total_orders_seen: usize,
    pub delivered: usize,
    pub expired_discards: usize,
    pub capacity_discards: usize,
}

/// Final report of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_orders_seen: usize,
    pub delivered: usize,
    pub expired_discards: usize,
    pub capacity_discards: usize,
    pub shelves: [ShelfLevel; 4],
}

impl Summary {
    pub fn free_capacity(&self, shelf: Shelf) -> usize {
        self.shelves[shelf.index()].free
    }

    /// Every order seen has been delivered or discarded exactly once.
    pub fn is_conserved(&self) -> bool {
        self.total_orders_seen == self.delivered + self.expired_discards + self.capacity_discards
    }

    /// Checks the drain conditions: every shelf empty and fully free, and conservation holds.
    pub fn check_drained(&self) -> Result<(), KitchenError> {
        for level in &self.shelves {
            if level.held != 0 || level.free != level.capacity {
                return Err(KitchenError::InvariantViolation(format!(
                    "{} shelf should be clear at drain: held {}, free {} of {}",
                    level.shelf, level.held, level.free, level.capacity
                )));
            }
        }
        if !self.is_conserved() {
            return Err(KitchenError::InvariantViolation(format!(
                "total orders {} != delivered {} + expired {} + capacity discards {}",
                self.total_orders_seen, self.delivered, self.expired_discards, self.capacity_discards
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Total orders:                 {}", self.total_orders_seen)?;
        writeln!(f, "  Delivered orders:             {}", self.delivered)?;
        writeln!(f, "  Expired orders:               {}", self.expired_discards)?;
        writeln!(f, "  Discarded for lack of space:  {}", self.capacity_discards)?;
        for level in &self.shelves {
            writeln!(f, "  Free on {:<9} {}/{}", level.shelf, level.free, level.capacity)?;
        }
        Ok(())
    }
}

/// Four shelves, their free-slot counters and the run's counters.
#[derive(Debug, Clone)]
pub struct ShelfStore {
    capacities: ShelfCapacities,
    overflow_multiplier: f64,
    shelves: [Vec<Order>; 4],
    free: [usize; 4],
    counters: Counters,
}

impl ShelfStore {
    pub fn new(capacities: ShelfCapacities, overflow_multiplier: f64) -> Self {
        Self {
            capacities,
            overflow_multiplier,
            shelves: Default::default(),
            free: Shelf::ALL.map(|shelf| capacities.of(shelf)),
            counters: Counters::default(),
        }
    }

    /// Places a newly arrived order.
    ///
    /// Preference: the matching shelf, then overflow. With overflow full, the overflow
    /// order closest to expiry whose own shelf has room is promoted to free a slot;
    /// failing that, the overflow order closest to expiry is discarded and its slot
    /// handed to the new order.
    pub fn place(&mut self, order: Order) -> Result<Placement, KitchenError> {
        if order.shelf.is_some() {
            return Err(KitchenError::InvariantViolation(format!(
                "order {} is already on a shelf",
                order.id
            )));
        }
        self.counters.total_orders_seen += 1;

        let preferred = order.temp.shelf();
        let placement = if self.has_room(preferred) {
            Placement::Placed {
                order: self.put(preferred, order),
            }
        } else if self.has_room(Shelf::Overflow) {
            Placement::Placed {
                order: self.put(Shelf::Overflow, order),
            }
        } else {
            self.make_room_on_overflow(order)
        };

        self.check_invariants()?;
        Ok(placement)
    }

    /// One decay tick: every held order loses its effective decay, expired orders are
    /// removed and returned.
    pub fn tick(&mut self) -> Result<Vec<Order>, KitchenError> {
        let multiplier = self.overflow_multiplier;
        let mut expired = Vec::new();

        for shelf in Shelf::ALL {
            let idx = shelf.index();
            let held = std::mem::take(&mut self.shelves[idx]);
            for mut order in held {
                order.remaining_shelf_life -= order.effective_decay_per_tick(multiplier);
                if order.remaining_shelf_life > 0.0 {
                    self.shelves[idx].push(order);
                } else {
                    self.free[idx] += 1;
                    self.counters.expired_discards += 1;
                    expired.push(order);
                }
            }
        }

        self.check_invariants()?;
        Ok(expired)
    }

    /// Hands the order closest to expiry, across all shelves, to a courier.
    ///
    /// `Ok(None)` means nothing is on the shelves; counters are left untouched.
    pub fn pickup(&mut self) -> Result<Option<Order>, KitchenError> {
        let multiplier = self.overflow_multiplier;
        let mut best: Option<(usize, usize, f64)> = None;
        for shelf in Shelf::ALL {
            for (pos, order) in self.shelves[shelf.index()].iter().enumerate() {
                let tte = order.time_to_expiry(multiplier);
                if best.map_or(true, |(_, _, min)| tte < min) {
                    best = Some((shelf.index(), pos, tte));
                }
            }
        }

        let Some((idx, pos, _)) = best else {
            return Ok(None);
        };
        let order = self.shelves[idx].remove(pos);
        self.free[idx] += 1;
        self.counters.delivered += 1;

        self.check_invariants()?;
        Ok(Some(order))
    }

    pub fn held(&self) -> usize {
        self.shelves.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.held() == 0
    }

    /// Orders on `shelf`, in insertion order.
    pub fn orders_on(&self, shelf: Shelf) -> &[Order] {
        &self.shelves[shelf.index()]
    }

    pub fn free_capacity(&self, shelf: Shelf) -> usize {
        self.free[shelf.index()]
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    pub fn levels(&self) -> [ShelfLevel; 4] {
        Shelf::ALL.map(|shelf| ShelfLevel {
            shelf,
            held: self.shelves[shelf.index()].len(),
            free: self.free[shelf.index()],
            capacity: self.capacities.of(shelf),
        })
    }

    pub fn summary(&self) -> Summary {
        Summary {
            total_orders_seen: self.counters.total_orders_seen,
            delivered: self.counters.delivered,
            expired_discards: self.counters.expired_discards,
            capacity_discards: self.counters.capacity_discards,
            shelves: self.levels(),
        }
    }

    /// Verifies that free-slot counters match occupancy and that every order records
    /// the shelf it is stored under.
    pub fn check_invariants(&self) -> Result<(), KitchenError> {
        for shelf in Shelf::ALL {
            let idx = shelf.index();
            let held = self.shelves[idx].len();
            let capacity = self.capacities.of(shelf);
            if held > capacity || held + self.free[idx] != capacity {
                return Err(KitchenError::InvariantViolation(format!(
                    "{shelf} shelf holds {held} with {} free, capacity {capacity}",
                    self.free[idx]
                )));
            }
            if let Some(stray) = self.shelves[idx].iter().find(|o| o.shelf != Some(shelf)) {
                return Err(KitchenError::InvariantViolation(format!(
                    "order {} stored on {shelf} but records {:?}",
                    stray.id, stray.shelf
                )));
            }
        }
        Ok(())
    }

    fn has_room(&self, shelf: Shelf) -> bool {
        self.free[shelf.index()] > 0
    }

    fn put(&mut self, shelf: Shelf, mut order: Order) -> Order {
        order.shelf = Some(shelf);
        self.free[shelf.index()] -= 1;
        self.shelves[shelf.index()].push(order.clone());
        order
    }

    // Overflow's free count never changes here: the vacated slot goes straight to the
    // new order.
    fn make_room_on_overflow(&mut self, mut order: Order) -> Placement {
        let multiplier = self.overflow_multiplier;
        let mut promote: Option<(usize, f64)> = None;
        let mut evict: Option<(usize, f64)> = None;

        for (pos, held) in self.shelves[OVERFLOW].iter().enumerate() {
            let tte = held.time_to_expiry(multiplier);
            if self.has_room(held.temp.shelf()) && promote.map_or(true, |(_, min)| tte < min) {
                promote = Some((pos, tte));
            }
            if evict.map_or(true, |(_, min)| tte < min) {
                evict = Some((pos, tte));
            }
        }

        match (promote, evict) {
            (Some((pos, _)), _) => {
                let mut promoted = self.shelves[OVERFLOW].remove(pos);
                let target = promoted.temp.shelf();
                promoted.shelf = Some(target);
                self.free[target.index()] -= 1;
                self.shelves[target.index()].push(promoted.clone());

                order.shelf = Some(Shelf::Overflow);
                self.shelves[OVERFLOW].push(order.clone());
                Placement::Promoted {
                    promoted,
                    placed: order,
                }
            }
            (None, Some((pos, _))) => {
                order.shelf = Some(Shelf::Overflow);
                let discarded = std::mem::replace(&mut self.shelves[OVERFLOW][pos], order.clone());
                self.counters.capacity_discards += 1;
                Placement::Evicted {
                    discarded,
                    placed: order,
                }
            }
            (None, None) => {
                self.counters.capacity_discards += 1;
                Placement::Rejected { discarded: order }
            }
        }
    }
}
