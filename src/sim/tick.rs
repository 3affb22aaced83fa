//! Single-step advance of a spirolateral run
//!
//! One tick moves the turtle one unit in its heading. When the current
//! slot's step count is used up the turtle turns clockwise and moves on to
//! the next slot; four passes over the five slots complete the run.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::heading::Heading;
use super::state::{Bounds, RunPhase, SimulationState, Termination};
use crate::consts::{LOOPS_PER_RUN, SLOT_COUNT};

/// A straight line drawn by the turtle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub from: IVec2,
    pub to: IVec2,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub segment: Segment,
    /// Heading the turtle travelled in (before any turn)
    pub heading: Heading,
    /// Slot whose steps were used up on this tick
    pub finished_slot: Option<usize>,
    /// Slot that is now being walked, if the run continues past a turn
    pub next_slot: Option<usize>,
    /// Set when this tick ended the run
    pub termination: Option<Termination>,
}

/// Advance a running simulation by one step.
///
/// Returns `None` without touching the state if the run is not active, so a
/// stale timer firing after stop is harmless. With `bounds` set, a step that
/// lands outside the square stops the run immediately.
pub fn tick(
    state: &mut SimulationState,
    steps: &[u8; SLOT_COUNT],
    bounds: Option<&Bounds>,
    unit: i32,
) -> Option<StepOutcome> {
    if !state.is_running() {
        return None;
    }

    let heading = state.heading;
    let from = state.pos;
    let to = from + heading.offset(unit);
    state.pos = to;
    state.ticks += 1;

    let mut termination = match bounds {
        Some(b) if !b.contains(to) => Some(Termination::OutOfBounds { heading, at: to }),
        _ => None,
    };

    // The step still counts toward the slot even when it left the square
    state.sub_step += 1;
    let mut finished_slot = None;
    let mut next_slot = None;
    if state.sub_step >= steps[state.slot] {
        finished_slot = Some(state.slot);
        state.sub_step = 0;
        state.heading = state.heading.rotate();
        state.slot_advances += 1;
        state.slot += 1;
        if state.slot == SLOT_COUNT {
            state.slot = 0;
            state.loops += 1;
        }
        if termination.is_none() {
            if state.loops >= LOOPS_PER_RUN {
                termination = Some(Termination::Completed);
            } else {
                next_slot = Some(state.slot);
            }
        }
    }

    if let Some(t) = termination {
        state.phase = RunPhase::Stopped(t);
    }

    Some(StepOutcome {
        segment: Segment { from, to },
        heading,
        finished_slot,
        next_slot,
        termination,
    })
}

/// Result of running a simulation to its end in one go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTrace {
    pub segments: Vec<Segment>,
    pub termination: Termination,
    pub slot_advances: u32,
}

/// Run a whole simulation synchronously (previews, tests, headless checks)
pub fn trace_run(steps: &[u8; SLOT_COUNT], origin: IVec2, bounds: &Bounds, unit: i32) -> RunTrace {
    let mut state = SimulationState::new();
    state.start(origin);
    let mut segments = Vec::new();
    while let Some(outcome) = tick(&mut state, steps, Some(bounds), unit) {
        segments.push(outcome.segment);
    }
    RunTrace {
        segments,
        // tick only returns None once the phase has left Running
        termination: state.termination().unwrap_or(Termination::Completed),
        slot_advances: state.slot_advances,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landscape_bounds() -> Bounds {
        Bounds::square(IVec2::new(475, 25), 400)
    }

    const ORIGIN: IVec2 = IVec2::new(650, 350);

    #[test]
    fn test_tick_idle_is_noop() {
        let mut state = SimulationState::new();
        let before = state.clone();
        assert!(tick(&mut state, &[1, 1, 1, 3, 2], None, 50).is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn test_first_tick_moves_up() {
        let mut state = SimulationState::new();
        state.start(ORIGIN);
        let out = tick(&mut state, &[2, 1, 1, 1, 1], None, 50).unwrap();
        assert_eq!(out.segment.from, ORIGIN);
        assert_eq!(out.segment.to, IVec2::new(650, 300));
        assert_eq!(out.heading, Heading::Up);
        assert_eq!(out.finished_slot, None);
        assert_eq!(state.sub_step, 1);
    }

    #[test]
    fn test_slot_advance_turns_clockwise() {
        let mut state = SimulationState::new();
        state.start(ORIGIN);
        let out = tick(&mut state, &[1, 1, 1, 1, 1], None, 50).unwrap();
        assert_eq!(out.finished_slot, Some(0));
        assert_eq!(out.next_slot, Some(1));
        assert_eq!(state.heading, Heading::Right);
        assert_eq!(state.sub_step, 0);

        let out = tick(&mut state, &[1, 1, 1, 1, 1], None, 50).unwrap();
        assert_eq!(out.heading, Heading::Right);
        assert_eq!(out.segment.to, IVec2::new(700, 300));
    }

    #[test]
    fn test_loop_counter_increments_on_wrap() {
        let mut state = SimulationState::new();
        state.start(ORIGIN);
        let steps = [1, 1, 1, 1, 1];
        for _ in 0..4 {
            tick(&mut state, &steps, None, 50);
        }
        assert_eq!(state.loops, 0);
        let out = tick(&mut state, &steps, None, 50).unwrap();
        assert_eq!(out.finished_slot, Some(4));
        assert_eq!(out.next_slot, Some(0));
        assert_eq!(state.loops, 1);
    }

    #[test]
    fn test_completes_after_four_loops() {
        let steps = [1, 1, 1, 3, 2];
        let trace = trace_run(&steps, ORIGIN, &landscape_bounds(), 50);
        assert_eq!(trace.termination, Termination::Completed);
        assert_eq!(trace.slot_advances, 20);
        let total: u32 = steps.iter().map(|&s| s as u32).sum();
        assert_eq!(trace.segments.len() as u32, total * 4);
    }

    #[test]
    fn test_segments_are_contiguous() {
        let trace = trace_run(&[2, 3, 1, 2, 1], ORIGIN, &landscape_bounds(), 50);
        for pair in trace.segments.windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
    }

    #[test]
    fn test_out_of_bounds_stops_immediately() {
        // Up 250 to y=100, then right: 700, 750, 800, 850, 900 (> 875)
        let trace = trace_run(&[5, 5, 5, 5, 5], ORIGIN, &landscape_bounds(), 50);
        assert_eq!(
            trace.termination,
            Termination::OutOfBounds {
                heading: Heading::Right,
                at: IVec2::new(900, 100)
            }
        );
        // The exiting step is also the fifth step of slot 1
        assert_eq!(trace.segments.len(), 10);
        assert_eq!(trace.slot_advances, 2);
    }

    #[test]
    fn test_exit_on_last_step_of_slot_does_not_continue() {
        let bounds = Bounds::square(IVec2::new(0, 0), 100);
        let mut state = SimulationState::new();
        state.start(IVec2::new(50, 20));
        let out = tick(&mut state, &[1, 1, 1, 1, 1], Some(&bounds), 50).unwrap();
        assert_eq!(out.finished_slot, Some(0));
        assert_eq!(out.next_slot, None);
        assert!(matches!(out.termination, Some(Termination::OutOfBounds { .. })));
        assert!(!state.is_running());
    }

    #[test]
    fn test_stopped_run_ignores_ticks() {
        let mut state = SimulationState::new();
        state.start(ORIGIN);
        tick(&mut state, &[3, 3, 3, 3, 3], None, 50);
        state.stop();
        let pos = state.pos;
        assert!(tick(&mut state, &[3, 3, 3, 3, 3], None, 50).is_none());
        assert_eq!(state.pos, pos);
    }
}
