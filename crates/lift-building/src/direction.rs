//! Travel direction of a car or a passenger request.

use std::fmt;

use lift_core::FloorId;

/// Direction of travel.  `None` is reserved for cars without a commitment;
/// a passenger's direction is always `Up` or `Down`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    #[default]
    None,
}

impl Direction {
    /// The direction of travel from `from` to `to`.
    ///
    /// Returns `None` when the floors are equal — callers that require a
    /// real direction must reject that case first.
    pub fn between(from: FloorId, to: FloorId) -> Direction {
        use std::cmp::Ordering::*;
        match from.0.cmp(&to.0) {
            Less => Direction::Up,
            Greater => Direction::Down,
            Equal => Direction::None,
        }
    }

    /// The opposite direction.  `None` reverses to `None`.
    pub fn reversed(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::None => Direction::None,
        }
    }

    /// Signed floor delta per unit of travel: +1, -1, or 0.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Up => 1.0,
            Direction::Down => -1.0,
            Direction::None => 0.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::None => "none",
        };
        f.write_str(s)
    }
}
