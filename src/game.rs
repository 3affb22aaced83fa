//! Game controller
//!
//! Owns the session (steps, goal, level, score, delay) and the run in
//! progress. Runs advance one tick per timer firing; each tick re-arms the
//! next timer only while the run is still going.

use std::time::Duration;

use crate::consts::{DELAY_STEP_MS, MAX_DELAY_MS, MAX_STEP, MIN_DELAY_MS, PEN_WIDTH, SLOT_COUNT};
use crate::layout::LayoutConfig;
use crate::outcome::{Outcome, Verdict, judge};
use crate::patterns::{PatternStore, next_index};
use crate::persistence::SessionState;
use crate::platform::{
    Control, Entity, EntityHandle, EntityRegistry, InputCommand, Renderer, ScoreDisplay,
    Scheduler, TimerHandle,
};
use crate::score::Score;
use crate::sim::{
    GoalPattern, Heading, RunPhase, SimulationState, StepOutcome, StepSequence, Termination,
    tick, trace_goal,
};

pub struct GameController<S, R, D> {
    layout: LayoutConfig,
    store: PatternStore,
    registry: EntityRegistry,
    steps: StepSequence,
    goal: GoalPattern,
    /// Current pattern index (level)
    pattern: u32,
    score: Score,
    /// Tick interval in milliseconds
    delay: u32,
    delay_step: u32,
    pen_width: u32,
    sim: SimulationState,
    /// Pending tick of the active run
    timer: Option<TimerHandle>,
    next_enabled: bool,
    last_verdict: Option<Verdict>,
    scheduler: S,
    renderer: R,
    display: D,
}

impl<S: Scheduler, R: Renderer, D: ScoreDisplay> GameController<S, R, D> {
    /// Build a controller for a restored session and draw the first level
    pub fn new(
        session: SessionState,
        layout: LayoutConfig,
        store: PatternStore,
        scheduler: S,
        renderer: R,
        display: D,
    ) -> Self {
        let mut game = Self {
            layout,
            store,
            registry: EntityRegistry::new(),
            steps: StepSequence::default(),
            goal: GoalPattern::fallback(),
            pattern: session.level.max(1),
            score: Score::new(session.score, session.last),
            delay: session.delay.min(MAX_DELAY_MS),
            delay_step: DELAY_STEP_MS,
            pen_width: PEN_WIDTH,
            sim: SimulationState::new(),
            timer: None,
            next_enabled: false,
            last_verdict: None,
            scheduler,
            renderer,
            display,
        };
        game.reset_level();
        game
    }

    /// Change how far speed-up/slow-down move the delay
    pub fn with_delay_step(mut self, step: u32) -> Self {
        self.delay_step = step;
        self
    }

    /// Pen width for the goal and player lines
    pub fn with_pen_width(mut self, width: u32) -> Self {
        self.pen_width = width;
        self.renderer.set_pen_width(width);
        self
    }

    // === Accessors ===

    pub fn steps(&self) -> &StepSequence {
        &self.steps
    }

    pub fn goal(&self) -> &GoalPattern {
        &self.goal
    }

    pub fn pattern(&self) -> u32 {
        self.pattern
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn delay(&self) -> u32 {
        self.delay
    }

    pub fn phase(&self) -> RunPhase {
        self.sim.phase
    }

    pub fn is_running(&self) -> bool {
        self.sim.is_running()
    }

    pub fn simulation(&self) -> &SimulationState {
        &self.sim
    }

    pub fn next_enabled(&self) -> bool {
        self.next_enabled
    }

    /// Verdict of the most recent judged run
    pub fn last_verdict(&self) -> Option<Verdict> {
        self.last_verdict
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Snapshot for persistence
    pub fn session(&self) -> SessionState {
        SessionState {
            score: self.score.value,
            level: self.pattern,
            last: self.score.last_solved,
            delay: self.delay,
        }
    }

    // === Level management ===

    /// Redraw the current level from scratch (start-up, orientation change)
    pub fn reset_level(&mut self) {
        self.renderer.clear();
        self.renderer.set_pen_width(self.pen_width);
        self.show_user_numbers();
        self.load_goal();
        self.renderer.draw_level_label(self.pattern);
        self.draw_goal();
        self.reset_sprites();

        self.set_next_enabled(self.score.is_solved(self.pattern));
        if self.score.value > 0 {
            self.display.update_score(self.score.value);
        }
    }

    /// Move to the next pattern, wrapping after the last one.
    ///
    /// The player's step values are kept so a near miss can be reused.
    pub fn advance_level(&mut self) {
        self.stop_run();
        self.hide_results();
        self.pattern = next_index(self.pattern);
        self.load_goal();
        self.renderer.clear();
        self.renderer.set_pen_width(self.pen_width);
        self.renderer.draw_level_label(self.pattern);
        self.draw_goal();
        self.reset_user_turtle();
        self.show_user_numbers();
        self.set_next_enabled(false);
        log::info!("Level {}", self.pattern);
    }

    /// Swap layouts (orientation change) and redraw
    pub fn set_layout(&mut self, layout: LayoutConfig) {
        if layout == self.layout {
            return;
        }
        self.stop_run();
        self.layout = layout;
        self.reset_level();
    }

    // === Runs ===

    /// Start the player's turtle. Ignored if a run is already going.
    pub fn start_run(&mut self) -> bool {
        if self.sim.is_running() {
            log::debug!("Run already in progress, ignoring start");
            return false;
        }

        self.hide_results();
        self.renderer.clear();
        self.renderer.set_pen_width(self.pen_width);
        self.load_goal();
        self.renderer.draw_level_label(self.pattern);
        self.draw_goal();

        self.sim.start(self.layout.player_origin);
        self.renderer.set_control(Control::Run, false);
        self.glow_slot(0);
        self.reset_user_turtle();

        self.timer = Some(self.schedule_tick());
        log::info!(
            "Run started: steps {:?} on level {}",
            self.steps.values(),
            self.pattern
        );
        true
    }

    /// Player stop: cancels the pending tick, never judges the run.
    /// Returns true if a run was actually stopped.
    pub fn stop_run(&mut self) -> bool {
        if let Some(handle) = self.timer.take() {
            self.scheduler.cancel(handle);
        }
        self.renderer.set_control(Control::Run, true);
        let stopped = self.sim.stop();
        if stopped {
            log::info!("Run stopped after {} ticks", self.sim.ticks);
        }
        stopped
    }

    /// Timer callback. Handles other than the active one are stale and
    /// ignored.
    pub fn fire(&mut self, handle: TimerHandle) -> Option<StepOutcome> {
        if self.timer != Some(handle) {
            log::debug!("Ignoring stale tick {:?}", handle);
            return None;
        }
        self.timer = None;

        let bounds = self.layout.bounds();
        let outcome = tick(
            &mut self.sim,
            self.steps.values(),
            Some(&bounds),
            self.layout.player_unit,
        )?;

        let segment = outcome.segment;
        log::debug!(
            "Tick {}: {} -> {} heading {}",
            self.sim.ticks,
            segment.from,
            segment.to,
            outcome.heading.as_str()
        );
        self.renderer.draw_line(segment.from, segment.to);
        let turtle = self.registry.turtle(outcome.heading);
        let at = self.layout.turtle_sprite_position(segment.to, outcome.heading);
        self.renderer.place(turtle, at);
        self.show_turtle(outcome.heading);

        if let Some(slot) = outcome.finished_slot {
            self.unglow_slot(slot);
        }
        if let Some(slot) = outcome.next_slot {
            self.glow_slot(slot);
        }

        match outcome.termination {
            None => self.timer = Some(self.schedule_tick()),
            Some(termination) => self.finish_run(termination),
        }
        Some(outcome)
    }

    fn schedule_tick(&mut self) -> TimerHandle {
        self.scheduler.schedule_after(Duration::from_millis(u64::from(self.delay)))
    }

    fn finish_run(&mut self, termination: Termination) {
        self.renderer.set_control(Control::Run, true);
        match termination {
            Termination::OutOfBounds { heading, at } => {
                log::info!("Turtle left the box heading {}", heading.as_str());
                for h in Heading::ALL {
                    self.renderer.hide(self.registry.turtle(h));
                }
                let splot_at = self.layout.splot_position(at, heading);
                self.renderer.draw_marker(splot_at, heading);
                self.renderer.show(self.registry.handle(Entity::Splot));
            }
            Termination::Completed => self.reset_user_turtle(),
            Termination::Cancelled => return,
        }
        self.show_user_numbers();

        let Some(verdict) = judge(
            termination,
            &self.steps,
            &self.goal,
            &mut self.score,
            self.pattern,
        ) else {
            return;
        };
        match verdict.outcome {
            Outcome::Success => {
                log::info!(
                    "Pattern {} solved{}",
                    self.pattern,
                    if verdict.awarded { ", bonus awarded" } else { "" }
                );
                self.renderer.show(self.registry.handle(Entity::SuccessBanner));
                self.display.update_score(self.score.value);
            }
            Outcome::Failure => {
                log::info!("Pattern {} not matched", self.pattern);
                self.renderer.show(self.registry.handle(Entity::FailureBanner));
            }
        }
        self.set_next_enabled(verdict.next_enabled);
        self.last_verdict = Some(verdict);
    }

    // === Input ===

    /// Apply a player command. Anything that edits the steps stops the run
    /// first, so steps never change mid-run.
    pub fn handle(&mut self, command: InputCommand) {
        if command.edits_steps() {
            self.stop_run();
        }
        match command {
            InputCommand::SetValue(value) => {
                self.steps.set_active(value);
                self.show_slot(self.steps.active_slot());
            }
            InputCommand::Increment => {
                self.steps.increment_active();
                self.show_slot(self.steps.active_slot());
            }
            InputCommand::Decrement => {
                self.steps.decrement_active();
                self.show_slot(self.steps.active_slot());
            }
            InputCommand::SelectPrevious => self.steps.previous(),
            InputCommand::SelectNext => self.steps.next(),
            InputCommand::Cycle(slot) => {
                self.steps.cycle(slot);
                self.show_slot(self.steps.active_slot());
            }
            InputCommand::Run => {
                self.start_run();
            }
            InputCommand::Stop => {
                self.stop_run();
            }
            InputCommand::NextLevel => {
                if self.next_enabled {
                    self.advance_level();
                } else {
                    log::debug!("Next level is locked until pattern {} is solved", self.pattern);
                }
            }
            InputCommand::SetDelay(ms) => self.set_delay(ms),
            InputCommand::SpeedUp => self.speed_up(),
            InputCommand::SlowDown => self.slow_down(),
        }
    }

    /// Click on a sprite; number cards cycle their slot
    pub fn click(&mut self, entity: EntityHandle) -> bool {
        match self.registry.entity(entity) {
            Some(Entity::Number { slot, .. }) | Some(Entity::GlowNumber { slot, .. }) => {
                self.handle(InputCommand::Cycle(slot));
                true
            }
            _ => false,
        }
    }

    /// Replace all five step values (stops any run)
    pub fn set_steps(&mut self, values: [u8; SLOT_COUNT]) {
        self.stop_run();
        for (slot, value) in values.into_iter().enumerate() {
            self.steps.set(slot, value);
        }
        self.show_user_numbers();
    }

    // === Speed ===

    pub fn set_delay(&mut self, ms: u32) {
        self.delay = ms.clamp(MIN_DELAY_MS, MAX_DELAY_MS);
    }

    pub fn speed_up(&mut self) {
        self.set_delay(self.delay.saturating_sub(self.delay_step));
    }

    pub fn slow_down(&mut self) {
        self.set_delay(self.delay.saturating_add(self.delay_step));
    }

    // === Drawing helpers ===

    fn load_goal(&mut self) {
        let loaded = self.store.load(self.pattern);
        if loaded.index != self.pattern {
            log::info!("Level {} unavailable, back to level {}", self.pattern, loaded.index);
        }
        self.pattern = loaded.index;
        self.goal = loaded.pattern;
    }

    fn draw_goal(&mut self) {
        for segment in trace_goal(&self.goal, self.layout.goal_origin, self.layout.goal_unit) {
            self.renderer.draw_line(segment.from, segment.to);
        }
    }

    fn set_next_enabled(&mut self, enabled: bool) {
        self.next_enabled = enabled;
        self.renderer.set_control(Control::NextLevel, enabled);
    }

    fn hide_results(&mut self) {
        for entity in [Entity::SuccessBanner, Entity::FailureBanner, Entity::Splot] {
            self.renderer.hide(self.registry.handle(entity));
        }
    }

    fn reset_sprites(&mut self) {
        let target = self.registry.handle(Entity::TargetTurtle);
        self.renderer.place(target, self.layout.goal_turtle_home());
        self.renderer.show(target);
        for slot in 0..SLOT_COUNT {
            let at = self.layout.number_position(slot);
            for value in 1..=MAX_STEP {
                self.renderer.place(self.registry.number(slot, value), at);
                self.renderer.place(self.registry.glow(slot, value), at);
            }
        }
        self.hide_results();
        self.reset_user_turtle();
    }

    fn reset_user_turtle(&mut self) {
        let up = self.registry.turtle(Heading::Up);
        self.renderer.place(up, self.layout.player_turtle_home());
        self.show_turtle(Heading::Up);
    }

    fn show_turtle(&mut self, heading: Heading) {
        for h in Heading::ALL {
            let handle = self.registry.turtle(h);
            if h == heading {
                self.renderer.show(handle);
            } else {
                self.renderer.hide(handle);
            }
        }
    }

    /// Show only the card for the slot's current value
    fn show_slot(&mut self, slot: usize) {
        for value in 1..=MAX_STEP {
            self.renderer.hide(self.registry.number(slot, value));
            self.renderer.hide(self.registry.glow(slot, value));
        }
        self.renderer.show(self.registry.number(slot, self.steps.get(slot)));
    }

    fn show_user_numbers(&mut self) {
        for slot in 0..SLOT_COUNT {
            self.show_slot(slot);
        }
    }

    fn glow_slot(&mut self, slot: usize) {
        let value = self.steps.get(slot);
        self.renderer.hide(self.registry.number(slot, value));
        self.renderer.show(self.registry.glow(slot, value));
    }

    fn unglow_slot(&mut self, slot: usize) {
        let value = self.steps.get(slot);
        self.renderer.hide(self.registry.glow(slot, value));
        self.renderer.show(self.registry.number(slot, value));
    }
}
