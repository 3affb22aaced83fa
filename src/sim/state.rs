//! Run state for the spirolateral simulation
//!
//! A run lives from `start` until it completes four loops, leaves the
//! bounding square, or is stopped by the player.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::heading::Heading;

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Four full loops through the five slots
    Completed,
    /// The turtle stepped outside the bounding square
    OutOfBounds { heading: Heading, at: IVec2 },
    /// The player pressed stop
    Cancelled,
}

impl Termination {
    /// Completed and out-of-bounds runs are judged; cancelled ones are not
    pub fn is_evaluable(&self) -> bool {
        !matches!(self, Termination::Cancelled)
    }
}

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    #[default]
    Idle,
    Running,
    Stopped(Termination),
}

/// Axis-aligned square the player's turtle must stay within (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: IVec2,
    pub max: IVec2,
}

impl Bounds {
    pub fn new(min: IVec2, max: IVec2) -> Self {
        Self { min, max }
    }

    /// Square with top-left corner `origin` and side `size`
    pub fn square(origin: IVec2, size: i32) -> Self {
        Self {
            min: origin,
            max: origin + IVec2::splat(size),
        }
    }

    #[inline]
    pub fn contains(&self, p: IVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Transient state of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationState {
    pub phase: RunPhase,
    pub pos: IVec2,
    pub heading: Heading,
    /// Slot whose step count is being walked (0-4)
    pub slot: usize,
    /// Steps taken so far within the current slot
    pub sub_step: u8,
    /// Completed passes over all five slots
    pub loops: u32,
    /// Slot completions since start
    pub slot_advances: u32,
    pub ticks: u32,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationState {
    pub fn new() -> Self {
        Self {
            phase: RunPhase::Idle,
            pos: IVec2::ZERO,
            heading: Heading::Up,
            slot: 0,
            sub_step: 0,
            loops: 0,
            slot_advances: 0,
            ticks: 0,
        }
    }

    /// Reset everything and begin a run at `origin` facing up
    pub fn start(&mut self, origin: IVec2) {
        *self = Self {
            phase: RunPhase::Running,
            pos: origin,
            ..Self::new()
        };
    }

    /// Player stop. Returns false if nothing was running.
    pub fn stop(&mut self) -> bool {
        if self.is_running() {
            self.phase = RunPhase::Stopped(Termination::Cancelled);
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    pub fn termination(&self) -> Option<Termination> {
        match self.phase {
            RunPhase::Stopped(t) => Some(t),
            _ => None,
        }
    }
}
