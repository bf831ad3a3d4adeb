//! Side and Score: the two competing sides of a match and their running score.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two sides in a match (a player in singles, a pair in doubles).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Side {
    #[default]
    #[serde(rename = "side1")]
    Side1,
    #[serde(rename = "side2")]
    Side2,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Side1 => Side::Side2,
            Side::Side2 => Side::Side1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Side1 => write!(f, "side1"),
            Side::Side2 => write!(f, "side2"),
        }
    }
}

/// Running score of a game. Exactly two sides exist, so this is a fixed record rather than a map.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub side1: u32,
    pub side2: u32,
}

impl Score {
    pub fn new(side1: u32, side2: u32) -> Self {
        Self { side1, side2 }
    }

    /// Points held by `side`.
    pub fn of(&self, side: Side) -> u32 {
        match side {
            Side::Side1 => self.side1,
            Side::Side2 => self.side2,
        }
    }

    /// Add one point for `side`.
    pub fn add_point(&mut self, side: Side) {
        match side {
            Side::Side1 => self.side1 += 1,
            Side::Side2 => self.side2 += 1,
        }
    }

    /// Total rallies played so far.
    pub fn total(&self) -> u32 {
        self.side1 + self.side2
    }

    /// Side ahead on points, or None when level.
    pub fn leader(&self) -> Option<Side> {
        match self.side1.cmp(&self.side2) {
            std::cmp::Ordering::Greater => Some(Side::Side1),
            std::cmp::Ordering::Less => Some(Side::Side2),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Absolute point difference between the sides.
    pub fn margin(&self) -> u32 {
        self.side1.abs_diff(self.side2)
    }
}

/// Canonical `"side1-side2"` form, as submitted with a result.
impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.side1, self.side2)
    }
}
