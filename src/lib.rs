//! Spirolaterals - a turtle pattern-matching puzzle
//!
//! Core modules:
//! - `sim`: Deterministic turtle simulation (headings, steps, ticks)
//! - `game`: Run/stop/level orchestration over a timer
//! - `platform`: Renderer, score, scheduler and input seams
//! - `patterns`: Goal pattern table
//! - `outcome` / `score`: Judging runs and awarding the bonus
//! - `persistence` / `settings`: Session and preference files

pub mod game;
pub mod layout;
pub mod outcome;
pub mod patterns;
pub mod persistence;
pub mod platform;
pub mod score;
pub mod settings;
pub mod sim;

pub use game::GameController;
pub use layout::{LayoutConfig, Orientation};
pub use persistence::SessionState;
pub use settings::{OrientationPreference, Settings};

/// Game configuration constants
pub mod consts {
    /// Number of step slots
    pub const SLOT_COUNT: usize = 5;
    /// Step value range (inclusive)
    pub const MIN_STEP: u8 = 1;
    pub const MAX_STEP: u8 = 5;
    /// Full passes over the five slots before a run completes
    pub const LOOPS_PER_RUN: u32 = 4;

    /// Lines in the pattern table; levels wrap after the last one
    pub const PATTERN_COUNT: u32 = 122;
    /// Goal used whenever the table cannot supply one
    pub const FALLBACK_PATTERN: [u8; SLOT_COUNT] = [1, 1, 1, 3, 2];

    /// Tick interval (ms)
    pub const DEFAULT_DELAY_MS: u32 = 500;
    pub const MIN_DELAY_MS: u32 = 0;
    pub const MAX_DELAY_MS: u32 = 1000;
    pub const DELAY_STEP_MS: u32 = 25;

    /// Turtle pen width in pixels
    pub const PEN_WIDTH: u32 = 4;
}
