//! Platform abstraction layer
//!
//! The game core talks to the outside world only through these seams:
//! - Drawing and sprite visibility (`Renderer`)
//! - Score display (`ScoreDisplay`)
//! - Timers (`Scheduler`)
//! - Player commands (`InputCommand`)

pub mod entities;
pub mod input;
pub mod scheduler;

pub use entities::{Entity, EntityHandle, EntityRegistry};
pub use input::InputCommand;
pub use scheduler::{ManualScheduler, Scheduler, TimerHandle};

use glam::IVec2;

use crate::sim::Heading;

/// Toolbar buttons whose sensitivity the game controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Run,
    NextLevel,
}

/// Drawing collaborator. All calls are synchronous.
pub trait Renderer {
    /// Repaint the background and both boxes, erasing all lines
    fn clear(&mut self);
    /// Show the level number in the goal box
    fn draw_level_label(&mut self, pattern: u32);
    /// Line width for both turtles' pens
    fn set_pen_width(&mut self, width: u32);
    fn draw_line(&mut self, from: IVec2, to: IVec2);
    /// Failure mark where the turtle left the box, oriented by heading
    fn draw_marker(&mut self, at: IVec2, heading: Heading);
    fn place(&mut self, entity: EntityHandle, at: IVec2);
    fn show(&mut self, entity: EntityHandle);
    fn hide(&mut self, entity: EntityHandle);
    fn set_control(&mut self, control: Control, enabled: bool);
}

/// Score collaborator
pub trait ScoreDisplay {
    fn update_score(&mut self, score: u32);
}

/// One recorded renderer call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCommand {
    Clear,
    LevelLabel(u32),
    PenWidth(u32),
    Line { from: IVec2, to: IVec2 },
    Marker { at: IVec2, heading: Heading },
    Place { entity: EntityHandle, at: IVec2 },
    Show(EntityHandle),
    Hide(EntityHandle),
    Control { control: Control, enabled: bool },
}

/// Renderer that records every call, for headless play and tests
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    pub commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines drawn since the last `clear`
    pub fn lines_since_clear(&self) -> Vec<(IVec2, IVec2)> {
        let start = self
            .commands
            .iter()
            .rposition(|c| *c == DrawCommand::Clear)
            .map_or(0, |i| i + 1);
        self.commands[start..]
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    /// Whether `entity` is currently visible according to the recorded calls
    pub fn is_visible(&self, entity: EntityHandle) -> bool {
        self.commands
            .iter()
            .rev()
            .find_map(|c| match c {
                DrawCommand::Show(e) if *e == entity => Some(true),
                DrawCommand::Hide(e) if *e == entity => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// Last state set for a control (controls start enabled)
    pub fn control_enabled(&self, control: Control) -> bool {
        self.commands
            .iter()
            .rev()
            .find_map(|cmd| match cmd {
                DrawCommand::Control { control: c, enabled } if *c == control => Some(*enabled),
                _ => None,
            })
            .unwrap_or(true)
    }

    /// Most recent pen width set
    pub fn pen_width(&self) -> Option<u32> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::PenWidth(w) => Some(*w),
            _ => None,
        })
    }

    pub fn markers(&self) -> Vec<(IVec2, Heading)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Marker { at, heading } => Some((*at, *heading)),
                _ => None,
            })
            .collect()
    }

    pub fn clear_log(&mut self) {
        self.commands.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn draw_level_label(&mut self, pattern: u32) {
        self.commands.push(DrawCommand::LevelLabel(pattern));
    }

    fn set_pen_width(&mut self, width: u32) {
        self.commands.push(DrawCommand::PenWidth(width));
    }

    fn draw_line(&mut self, from: IVec2, to: IVec2) {
        self.commands.push(DrawCommand::Line { from, to });
    }

    fn draw_marker(&mut self, at: IVec2, heading: Heading) {
        self.commands.push(DrawCommand::Marker { at, heading });
    }

    fn place(&mut self, entity: EntityHandle, at: IVec2) {
        self.commands.push(DrawCommand::Place { entity, at });
    }

    fn show(&mut self, entity: EntityHandle) {
        self.commands.push(DrawCommand::Show(entity));
    }

    fn hide(&mut self, entity: EntityHandle) {
        self.commands.push(DrawCommand::Hide(entity));
    }

    fn set_control(&mut self, control: Control, enabled: bool) {
        self.commands.push(DrawCommand::Control { control, enabled });
    }
}

/// Score display that remembers every update
#[derive(Debug, Default, Clone)]
pub struct RecordingScore {
    pub updates: Vec<u32>,
}

impl ScoreDisplay for RecordingScore {
    fn update_score(&mut self, score: u32) {
        self.updates.push(score);
    }
}

/// Score display that writes to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogScore;

impl ScoreDisplay for LogScore {
    fn update_score(&mut self, score: u32) {
        log::info!("Score: {score}");
    }
}
