//! Deterministic spirolateral simulation
//!
//! All turtle logic lives here. This module must stay pure:
//! - Integer positions only
//! - No timers, rendering or platform dependencies
//! - Same inputs, same segments

pub mod goal;
pub mod heading;
pub mod state;
pub mod steps;
pub mod tick;

pub use goal::trace_goal;
pub use heading::Heading;
pub use state::{Bounds, RunPhase, SimulationState, Termination};
pub use steps::{GoalPattern, StepSequence};
pub use tick::{RunTrace, Segment, StepOutcome, tick, trace_run};
