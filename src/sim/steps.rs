//! Step sequences: the player's five editable slots and the goal pattern

use serde::{Deserialize, Serialize};

use crate::consts::{FALLBACK_PATTERN, MAX_STEP, MIN_STEP, SLOT_COUNT};

#[inline]
fn clamp_step(value: u8) -> u8 {
    value.clamp(MIN_STEP, MAX_STEP)
}

/// Target pattern for a level (read-only once loaded)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u8; 5]", into = "[u8; 5]")]
pub struct GoalPattern([u8; SLOT_COUNT]);

impl From<[u8; SLOT_COUNT]> for GoalPattern {
    fn from(values: [u8; SLOT_COUNT]) -> Self {
        Self::new(values)
    }
}

impl From<GoalPattern> for [u8; SLOT_COUNT] {
    fn from(goal: GoalPattern) -> Self {
        goal.0
    }
}

impl GoalPattern {
    /// Build a goal, clamping every value into the valid step range
    pub fn new(values: [u8; SLOT_COUNT]) -> Self {
        Self(values.map(clamp_step))
    }

    pub fn values(&self) -> &[u8; SLOT_COUNT] {
        &self.0
    }

    /// Pattern used whenever the table cannot be read
    pub fn fallback() -> Self {
        Self(FALLBACK_PATTERN)
    }
}

impl Default for GoalPattern {
    fn default() -> Self {
        Self::fallback()
    }
}

/// The player's step counts plus the slot that responds to input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StepsRecord")]
pub struct StepSequence {
    values: [u8; SLOT_COUNT],
    active: usize,
}

/// Unchecked on-disk form; converted through the clamping constructor
#[derive(Deserialize)]
struct StepsRecord {
    values: [u8; SLOT_COUNT],
    #[serde(default)]
    active: usize,
}

impl From<StepsRecord> for StepSequence {
    fn from(record: StepsRecord) -> Self {
        let mut steps = Self::new(record.values);
        steps.select(record.active);
        steps
    }
}

impl Default for StepSequence {
    fn default() -> Self {
        Self {
            values: FALLBACK_PATTERN,
            active: 0,
        }
    }
}

impl StepSequence {
    pub fn new(values: [u8; SLOT_COUNT]) -> Self {
        Self {
            values: values.map(clamp_step),
            active: 0,
        }
    }

    pub fn values(&self) -> &[u8; SLOT_COUNT] {
        &self.values
    }

    /// Step count of a slot (index taken modulo 5)
    pub fn get(&self, slot: usize) -> u8 {
        self.values[slot % SLOT_COUNT]
    }

    pub fn active_slot(&self) -> usize {
        self.active
    }

    pub fn active_value(&self) -> u8 {
        self.values[self.active]
    }

    /// Set a slot value; out-of-range values are clamped, never rejected
    pub fn set(&mut self, slot: usize, value: u8) {
        self.values[slot % SLOT_COUNT] = clamp_step(value);
    }

    pub fn set_active(&mut self, value: u8) {
        self.set(self.active, value);
    }

    /// Add one, saturating at 5
    pub fn increment(&mut self, slot: usize) {
        let slot = slot % SLOT_COUNT;
        self.values[slot] = clamp_step(self.values[slot].saturating_add(1));
    }

    /// Subtract one, saturating at 1
    pub fn decrement(&mut self, slot: usize) {
        let slot = slot % SLOT_COUNT;
        self.values[slot] = clamp_step(self.values[slot].saturating_sub(1));
    }

    pub fn increment_active(&mut self) {
        self.increment(self.active);
    }

    pub fn decrement_active(&mut self) {
        self.decrement(self.active);
    }

    /// Click behaviour: the slot becomes active and its value cycles 1..=5
    pub fn cycle(&mut self, slot: usize) {
        let slot = slot % SLOT_COUNT;
        self.active = slot;
        self.values[slot] = self.values[slot] % MAX_STEP + 1;
    }

    /// Move the cursor right, wrapping 4 → 0
    pub fn next(&mut self) {
        self.active = (self.active + 1) % SLOT_COUNT;
    }

    /// Move the cursor left, wrapping 0 → 4
    pub fn previous(&mut self) {
        self.active = (self.active + SLOT_COUNT - 1) % SLOT_COUNT;
    }

    pub fn select(&mut self, slot: usize) {
        self.active = slot % SLOT_COUNT;
    }

    /// Element-wise, order-sensitive comparison against the goal
    pub fn matches(&self, goal: &GoalPattern) -> bool {
        self.values == goal.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_clamps_silently() {
        let mut steps = StepSequence::default();
        steps.set(0, 9);
        assert_eq!(steps.get(0), 5);
        steps.set(1, 0);
        assert_eq!(steps.get(1), 1);
        // Slot index wraps
        steps.set(7, 4);
        assert_eq!(steps.get(2), 4);
    }

    #[test]
    fn test_increment_decrement_saturate() {
        let mut steps = StepSequence::new([5, 1, 3, 3, 3]);
        steps.increment(0);
        assert_eq!(steps.get(0), 5);
        steps.decrement(1);
        assert_eq!(steps.get(1), 1);
        steps.increment(2);
        assert_eq!(steps.get(2), 4);
        steps.decrement(3);
        assert_eq!(steps.get(3), 2);
    }

    #[test]
    fn test_cursor_wraps_both_ways() {
        let mut steps = StepSequence::default();
        steps.previous();
        assert_eq!(steps.active_slot(), 4);
        steps.next();
        assert_eq!(steps.active_slot(), 0);
        for _ in 0..7 {
            steps.next();
        }
        assert_eq!(steps.active_slot(), 2);
    }

    #[test]
    fn test_active_slot_edits() {
        let mut steps = StepSequence::new([1, 1, 1, 1, 1]);
        steps.next();
        steps.set_active(3);
        steps.increment_active();
        assert_eq!(steps.values(), &[1, 4, 1, 1, 1]);
        steps.decrement_active();
        steps.decrement_active();
        assert_eq!(steps.active_value(), 2);
    }

    #[test]
    fn test_cycle_wraps_and_selects() {
        let mut steps = StepSequence::new([1, 1, 1, 1, 5]);
        steps.cycle(4);
        assert_eq!(steps.active_slot(), 4);
        assert_eq!(steps.get(4), 1);
        steps.cycle(4);
        assert_eq!(steps.get(4), 2);
    }

    #[test]
    fn test_matches_is_order_sensitive() {
        let goal = GoalPattern::new([1, 1, 1, 3, 2]);
        assert!(StepSequence::new([1, 1, 1, 3, 2]).matches(&goal));
        assert!(!StepSequence::new([1, 1, 1, 3, 3]).matches(&goal));
        assert!(!StepSequence::new([2, 3, 1, 1, 1]).matches(&goal));
    }

    #[test]
    fn test_goal_new_clamps() {
        assert_eq!(GoalPattern::new([0, 6, 3, 3, 3]).values(), &[1, 5, 3, 3, 3]);
    }

    #[test]
    fn test_deserialize_clamps_values_and_cursor() {
        let steps: StepSequence =
            serde_json::from_str(r#"{"values":[9,0,1,1,1],"active":7}"#).unwrap();
        assert_eq!(steps.values(), &[5, 1, 1, 1, 1]);
        assert_eq!(steps.active_slot(), 2);
        assert_eq!(steps.active_value(), 1);
    }

    #[test]
    fn test_serialized_steps_read_back() {
        let mut steps = StepSequence::new([2, 3, 4, 5, 1]);
        steps.select(3);
        let json = serde_json::to_string(&steps).unwrap();
        assert_eq!(serde_json::from_str::<StepSequence>(&json).unwrap(), steps);
    }

    #[test]
    fn test_goal_deserialize_clamps() {
        let goal: GoalPattern = serde_json::from_str("[0,6,3,3,3]").unwrap();
        assert_eq!(goal.values(), &[1, 5, 3, 3, 3]);
        assert_eq!(serde_json::to_string(&goal).unwrap(), "[1,5,3,3,3]");
    }
}
