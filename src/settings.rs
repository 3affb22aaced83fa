//! Game settings and preferences
//!
//! Persisted separately from the session as a JSON file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DELAY_STEP_MS, PEN_WIDTH};
use crate::layout::{LayoutConfig, Orientation};
use crate::patterns::PatternStore;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings file {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Which board layout to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OrientationPreference {
    /// Follow the screen shape
    #[default]
    Auto,
    Landscape,
    Portrait,
}

impl OrientationPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrientationPreference::Auto => "Auto",
            OrientationPreference::Landscape => "Landscape",
            OrientationPreference::Portrait => "Portrait",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(OrientationPreference::Auto),
            "landscape" | "wide" => Some(OrientationPreference::Landscape),
            "portrait" | "tall" => Some(OrientationPreference::Portrait),
            _ => None,
        }
    }

    /// Resolve against the actual screen size
    pub fn resolve(&self, width: u32, height: u32) -> Orientation {
        match self {
            OrientationPreference::Auto => Orientation::from_screen(width, height),
            OrientationPreference::Landscape => Orientation::Landscape,
            OrientationPreference::Portrait => Orientation::Portrait,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub orientation: OrientationPreference,
    /// Pattern table to use instead of the bundled one
    pub pattern_table: Option<PathBuf>,
    /// Line width the renderer should use for both turtles
    pub pen_width: u32,
    /// Delay change per speed-up/slow-down press (ms)
    pub speed_step: u32,
    /// Where the session is saved
    pub session_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            orientation: OrientationPreference::Auto,
            pattern_table: None,
            pen_width: PEN_WIDTH,
            speed_step: DELAY_STEP_MS,
            session_file: PathBuf::from("spirolaterals-session.json"),
        }
    }
}

impl Settings {
    /// Layout for a screen of the given size
    pub fn layout(&self, width: u32, height: u32) -> LayoutConfig {
        LayoutConfig::for_orientation(self.orientation.resolve(width, height))
    }

    pub fn pattern_store(&self) -> PatternStore {
        match &self.pattern_table {
            Some(path) => PatternStore::from_path(path),
            None => PatternStore::embedded(),
        }
    }

    /// Load settings; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(json) => {
                let settings =
                    serde_json::from_str(&json).map_err(|source| SettingsError::Format {
                        path: path.to_path_buf(),
                        source,
                    })?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
            Err(source) => Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Format {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved");
        Ok(())
    }
}
