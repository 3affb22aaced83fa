//! Running score
//!
//! Solving a pattern earns a fixed bonus, but only the first time in a row:
//! solving the same level again before moving on earns nothing.

use serde::{Deserialize, Serialize};

/// Points for solving a pattern
pub const SOLVE_BONUS: u32 = 6;

/// Score plus the last pattern that earned it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub value: u32,
    /// Last solved pattern index
    pub last_solved: Option<u32>,
}

impl Score {
    pub fn new(value: u32, last_solved: Option<u32>) -> Self {
        Self { value, last_solved }
    }

    /// Record a solve of `pattern`. Returns true if the bonus was awarded.
    pub fn record_solve(&mut self, pattern: u32) -> bool {
        if self.last_solved == Some(pattern) {
            return false;
        }
        self.value = self.value.saturating_add(SOLVE_BONUS);
        self.last_solved = Some(pattern);
        true
    }

    /// Whether `pattern` is the one most recently solved
    pub fn is_solved(&self, pattern: u32) -> bool {
        self.last_solved == Some(pattern)
    }
}
