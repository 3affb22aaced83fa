//! Goal pattern table
//!
//! One five-digit line per level, 1-based. The table is read-only; any
//! failure to read a level falls back to the first pattern and level 1.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::consts::{MAX_STEP, MIN_STEP, PATTERN_COUNT, SLOT_COUNT};
use crate::sim::GoalPattern;

/// Bundled table (122 levels)
pub const EMBEDDED_PATTERNS: &str = include_str!("../data/patterns.dat");

/// Why a table line could not be turned into a goal
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("cannot read pattern table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("pattern index {index} is not in the table ({len} lines)")]
    IndexOutOfRange { index: u32, len: usize },
    #[error("pattern line {index} is malformed: {line:?}")]
    Malformed { index: u32, line: String },
}

/// A goal together with the level index it was actually loaded for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedGoal {
    pub pattern: GoalPattern,
    pub index: u32,
}

impl LoadedGoal {
    pub fn fallback() -> Self {
        Self {
            pattern: GoalPattern::fallback(),
            index: 1,
        }
    }
}

#[derive(Debug, Clone)]
enum PatternSource {
    File(PathBuf),
    Text(String),
    Embedded,
}

/// Loads goal patterns by level index
#[derive(Debug, Clone)]
pub struct PatternStore {
    source: PatternSource,
}

impl Default for PatternStore {
    fn default() -> Self {
        Self::embedded()
    }
}

impl PatternStore {
    pub fn embedded() -> Self {
        Self {
            source: PatternSource::Embedded,
        }
    }

    /// Read from a file on every load (the file is never written)
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            source: PatternSource::File(path.as_ref().to_path_buf()),
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            source: PatternSource::Text(text.into()),
        }
    }

    /// Load level `index`. Never fails: on any error the fallback pattern is
    /// returned with index 1, which the caller must treat as a level reset.
    pub fn load(&self, index: u32) -> LoadedGoal {
        match self.try_load(index) {
            Ok(pattern) => LoadedGoal { pattern, index },
            Err(err) => {
                log::warn!("{err}; falling back to pattern 1");
                LoadedGoal::fallback()
            }
        }
    }

    /// Load level `index`, reporting the failure instead of recovering
    pub fn try_load(&self, index: u32) -> Result<GoalPattern, PatternError> {
        match &self.source {
            PatternSource::File(path) => {
                let text = fs::read_to_string(path).map_err(|source| PatternError::Io {
                    path: path.clone(),
                    source,
                })?;
                parse_line(&text, index)
            }
            PatternSource::Text(text) => parse_line(text, index),
            PatternSource::Embedded => parse_line(EMBEDDED_PATTERNS, index),
        }
    }

    /// Number of lines in the table (0 if it cannot be read)
    pub fn len(&self) -> usize {
        match &self.source {
            PatternSource::File(path) => fs::read_to_string(path)
                .map(|t| t.lines().count())
                .unwrap_or(0),
            PatternSource::Text(text) => text.lines().count(),
            PatternSource::Embedded => EMBEDDED_PATTERNS.lines().count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Level after `index`, wrapping from the last table entry back to 1
pub fn next_index(index: u32) -> u32 {
    if index >= PATTERN_COUNT { 1 } else { index + 1 }
}

fn parse_line(text: &str, index: u32) -> Result<GoalPattern, PatternError> {
    let len = text.lines().count();
    let line = index
        .checked_sub(1)
        .and_then(|i| text.lines().nth(i as usize))
        .ok_or(PatternError::IndexOutOfRange { index, len })?;

    let malformed = || PatternError::Malformed {
        index,
        line: line.to_string(),
    };

    let digits: Vec<u8> = line
        .trim_end_matches('\r')
        .chars()
        .take(SLOT_COUNT)
        .map(|c| c.to_digit(10).map(|d| d as u8))
        .collect::<Option<_>>()
        .ok_or_else(malformed)?;

    let values: [u8; SLOT_COUNT] = digits.try_into().map_err(|_| malformed())?;
    if values.iter().any(|v| !(MIN_STEP..=MAX_STEP).contains(v)) {
        return Err(malformed());
    }
    Ok(GoalPattern::new(values))
}
