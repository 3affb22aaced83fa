//! Discrete player commands and the keyboard bindings that produce them

use serde::{Deserialize, Serialize};

/// A command delivered by the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputCommand {
    /// Set the active slot to a value (1-5)
    SetValue(u8),
    Increment,
    Decrement,
    SelectPrevious,
    SelectNext,
    /// Click on a slot's number card: select it and cycle its value
    Cycle(usize),
    Run,
    Stop,
    NextLevel,
    /// Tick interval in milliseconds
    SetDelay(u32),
    SpeedUp,
    SlowDown,
}

impl InputCommand {
    /// Map a key name (GDK naming) to a command
    pub fn from_key(key: &str) -> Option<Self> {
        let cmd = match key {
            "1" | "2" | "3" | "4" | "5" => {
                let value = key.parse().ok()?;
                InputCommand::SetValue(value)
            }
            "KP_Up" | "j" | "Up" => InputCommand::Increment,
            "KP_Down" | "k" | "Down" => InputCommand::Decrement,
            "KP_Left" | "h" | "Left" => InputCommand::SelectPrevious,
            "KP_Right" | "l" | "Right" => InputCommand::SelectNext,
            "Return" | "KP_Page_Up" | "KP_End" => InputCommand::Run,
            "space" | "Esc" | "KP_Page_Down" | "KP_Home" => InputCommand::Stop,
            _ => {
                log::debug!("Unbound key: {key}");
                return None;
            }
        };
        Some(cmd)
    }

    /// Commands that edit the step sequence or move the cursor
    pub fn edits_steps(&self) -> bool {
        matches!(
            self,
            InputCommand::SetValue(_)
                | InputCommand::Increment
                | InputCommand::Decrement
                | InputCommand::SelectPrevious
                | InputCommand::SelectNext
                | InputCommand::Cycle(_)
        )
    }
}
