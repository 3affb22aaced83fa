//! Judging a finished run against the goal

use crate::score::Score;
use crate::sim::{GoalPattern, StepSequence, Termination};

/// Result of comparing the player's steps to the goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

/// Everything the controller needs to act on an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub outcome: Outcome,
    /// Bonus was added to the score by this run
    pub awarded: bool,
    /// Whether the player may move on to the next level
    pub next_enabled: bool,
}

/// Success iff all five slots equal the goal, in order
pub fn evaluate(steps: &StepSequence, goal: &GoalPattern) -> Outcome {
    if steps.matches(goal) {
        Outcome::Success
    } else {
        Outcome::Failure
    }
}

/// Apply an outcome to the score for level `pattern`
pub fn apply(score: &mut Score, pattern: u32, outcome: Outcome) -> Verdict {
    match outcome {
        Outcome::Success => Verdict {
            outcome,
            awarded: score.record_solve(pattern),
            next_enabled: true,
        },
        Outcome::Failure => Verdict {
            outcome,
            awarded: false,
            next_enabled: false,
        },
    }
}

/// Judge a finished run. Cancelled runs are never judged.
pub fn judge(
    termination: Termination,
    steps: &StepSequence,
    goal: &GoalPattern,
    score: &mut Score,
    pattern: u32,
) -> Option<Verdict> {
    if !termination.is_evaluable() {
        return None;
    }
    Some(apply(score, pattern, evaluate(steps, goal)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Heading;
    use glam::IVec2;

    #[test]
    fn test_evaluate_exact_match() {
        let goal = GoalPattern::new([1, 1, 1, 3, 2]);
        assert_eq!(evaluate(&StepSequence::new([1, 1, 1, 3, 2]), &goal), Outcome::Success);
        assert_eq!(evaluate(&StepSequence::new([1, 1, 1, 3, 3]), &goal), Outcome::Failure);
    }

    #[test]
    fn test_failure_disables_next() {
        let mut score = Score::new(6, Some(1));
        let v = apply(&mut score, 1, Outcome::Failure);
        assert!(!v.next_enabled);
        assert!(!v.awarded);
        assert_eq!(score.value, 6);
    }

    #[test]
    fn test_repeat_success_not_rewarded() {
        let mut score = Score::default();
        let first = apply(&mut score, 5, Outcome::Success);
        let second = apply(&mut score, 5, Outcome::Success);
        assert!(first.awarded && first.next_enabled);
        assert!(!second.awarded && second.next_enabled);
        assert_eq!(score.value, 6);
    }

    #[test]
    fn test_judge_skips_cancelled() {
        let goal = GoalPattern::fallback();
        let steps = StepSequence::default();
        let mut score = Score::default();
        assert_eq!(judge(Termination::Cancelled, &steps, &goal, &mut score, 1), None);
        assert_eq!(score.value, 0);

        let exit = Termination::OutOfBounds {
            heading: Heading::Left,
            at: IVec2::new(0, 0),
        };
        let v = judge(exit, &steps, &goal, &mut score, 1).unwrap();
        assert_eq!(v.outcome, Outcome::Success);
        assert_eq!(score.value, 6);
    }
}
