//! Turtle headings
//!
//! The turtle only ever faces one of the four cardinal directions and always
//! turns 90° clockwise. Screen coordinates: +x is right, +y is down.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Direction the turtle is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Heading {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Heading {
    /// All headings in clockwise order starting from `Up`
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Right, Heading::Down, Heading::Left];

    /// Turn 90° clockwise (up → right → down → left → up)
    pub fn rotate(self) -> Self {
        match self {
            Heading::Up => Heading::Right,
            Heading::Right => Heading::Down,
            Heading::Down => Heading::Left,
            Heading::Left => Heading::Up,
        }
    }

    /// Position in the clockwise cycle (0 = up)
    pub fn index(self) -> usize {
        match self {
            Heading::Up => 0,
            Heading::Right => 1,
            Heading::Down => 2,
            Heading::Left => 3,
        }
    }

    /// Displacement of one step of length `unit`
    #[inline]
    pub fn offset(self, unit: i32) -> IVec2 {
        match self {
            Heading::Up => IVec2::new(0, -unit),
            Heading::Right => IVec2::new(unit, 0),
            Heading::Down => IVec2::new(0, unit),
            Heading::Left => IVec2::new(-unit, 0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Heading::Up => "up",
            Heading::Right => "right",
            Heading::Down => "down",
            Heading::Left => "left",
        }
    }
}
