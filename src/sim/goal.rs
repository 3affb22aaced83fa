//! Target pattern tracing
//!
//! The goal is drawn with exactly the same stepping rule as the player's
//! turtle, but synchronously, with no bounding square, always four loops.

use glam::IVec2;

use super::state::SimulationState;
use super::steps::GoalPattern;
use super::tick::{Segment, tick};

/// Every segment of the goal spirolateral starting at `origin`
pub fn trace_goal(goal: &GoalPattern, origin: IVec2, unit: i32) -> Vec<Segment> {
    let mut state = SimulationState::new();
    state.start(origin);
    let mut segments = Vec::new();
    while let Some(outcome) = tick(&mut state, goal.values(), None, unit) {
        segments.push(outcome.segment);
    }
    segments
}
