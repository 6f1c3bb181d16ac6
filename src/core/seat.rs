//! Seat identification and per-seat data storage.
//!
//! ## Seat
//!
//! TAKI is played here by exactly two seats. `Seat::other()` is the whole
//! of turn alternation; there is no seating order to configure.
//!
//! ## SeatMap
//!
//! Fixed two-slot storage indexed by `Seat`, used for anything the engine
//! keeps per seat (hands, occupants).

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two seats at the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Seat {
    A,
    B,
}

impl Seat {
    /// Both seats, in seating order.
    pub const ALL: [Seat; 2] = [Seat::A, Seat::B];

    /// The opposing seat.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Seat::A => Seat::B,
            Seat::B => Seat::A,
        }
    }

    /// Raw slot index (0 or 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Seat::A => 0,
            Seat::B => 1,
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seat::A => write!(f, "Seat A"),
            Seat::B => write!(f, "Seat B"),
        }
    }
}

/// Who currently owns the turn.
///
/// `Neutral` holds before the first turn of a game and after a reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnOwner {
    Seat(Seat),
    #[default]
    Neutral,
}

impl TurnOwner {
    /// The owning seat, if any.
    #[must_use]
    pub const fn seat(self) -> Option<Seat> {
        match self {
            TurnOwner::Seat(seat) => Some(seat),
            TurnOwner::Neutral => None,
        }
    }

    /// Check whether `seat` owns the turn.
    #[must_use]
    pub fn is(self, seat: Seat) -> bool {
        self == TurnOwner::Seat(seat)
    }
}

impl From<Seat> for TurnOwner {
    fn from(seat: Seat) -> Self {
        TurnOwner::Seat(seat)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use taki_engine::core::{Seat, SeatMap};
///
/// let mut cards: SeatMap<u32> = SeatMap::new(|_| 8);
/// cards[Seat::B] -= 1;
///
/// assert_eq!(cards[Seat::A], 8);
/// assert_eq!(cards[Seat::B], 7);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatMap<T> {
    data: [T; 2],
}

impl<T> SeatMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(mut factory: impl FnMut(Seat) -> T) -> Self {
        Self {
            data: [factory(Seat::A), factory(Seat::B)],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, seat: Seat) -> &T {
        &self.data[seat.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, seat: Seat) -> &mut T {
        &mut self.data[seat.index()]
    }

    /// Iterate over (Seat, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        Seat::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (Seat, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Seat, &mut T)> {
        Seat::ALL.into_iter().zip(self.data.iter_mut())
    }
}

impl<T> Index<Seat> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        self.get(seat)
    }
}

impl<T> IndexMut<Seat> for SeatMap<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        self.get_mut(seat)
    }
}
