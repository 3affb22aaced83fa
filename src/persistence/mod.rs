//! Session persistence
//!
//! The session is a flat string-to-string map (`score`, `level`, `last`,
//! `delay`), stored as a JSON object. Each value that fails to parse falls
//! back to its default on its own.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_DELAY_MS, MAX_DELAY_MS};

/// Sentinel stored for "no pattern solved yet"
const NONE_SENTINEL: &str = "None";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("cannot access session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("session file {path} is not a JSON object: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Raw key/value session metadata
pub type Metadata = BTreeMap<String, String>;

/// Everything carried from one session to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub score: u32,
    /// Current pattern index
    pub level: u32,
    /// Last solved pattern index
    pub last: Option<u32>,
    /// Tick interval in milliseconds
    pub delay: u32,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            last: None,
            delay: DEFAULT_DELAY_MS,
        }
    }
}

fn parse_or<T: std::str::FromStr>(meta: &Metadata, key: &str, default: T) -> T {
    match meta.get(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring bad session value {key}={raw:?}");
            default
        }),
    }
}

impl SessionState {
    /// Read from metadata, defaulting each missing or bad key
    pub fn from_metadata(meta: &Metadata) -> Self {
        let defaults = Self::default();
        let last = match meta.get("last").map(|s| s.trim()) {
            None | Some(NONE_SENTINEL) => None,
            Some(raw) => match raw.parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    log::warn!("Ignoring bad session value last={raw:?}");
                    None
                }
            },
        };
        let level = parse_or(meta, "level", defaults.level).max(1);
        Self {
            score: parse_or(meta, "score", defaults.score),
            level,
            last,
            delay: parse_or(meta, "delay", defaults.delay).min(MAX_DELAY_MS),
        }
    }

    pub fn to_metadata(&self) -> Metadata {
        let mut meta = Metadata::new();
        meta.insert("score".into(), self.score.to_string());
        meta.insert("level".into(), self.level.to_string());
        meta.insert(
            "last".into(),
            self.last
                .map_or_else(|| NONE_SENTINEL.to_string(), |v| v.to_string()),
        );
        meta.insert("delay".into(), self.delay.to_string());
        meta
    }

    /// Load from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No saved session at {}, starting fresh", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(PersistenceError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let meta: Metadata =
            serde_json::from_str(&json).map_err(|source| PersistenceError::Format {
                path: path.to_path_buf(),
                source,
            })?;
        let state = Self::from_metadata(&meta);
        log::info!(
            "Loaded session: level {}, score {}",
            state.level,
            state.score
        );
        Ok(state)
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        let io_err = |source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        };
        let json = serde_json::to_string_pretty(&self.to_metadata()).map_err(|source| {
            PersistenceError::Format {
                path: path.to_path_buf(),
                source,
            }
        })?;
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        fs::write(path, json).map_err(io_err)?;
        log::info!("Session saved (level {})", self.level);
        Ok(())
    }
}
