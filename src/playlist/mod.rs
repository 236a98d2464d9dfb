//! Playlist catalog
//!
//! An ordered, immutable list of timers. Built from code, from the built-in
//! stub catalog, or from a JSON file.

pub mod timer;

use std::{collections::HashSet, path::Path};

use tracing::{debug, info};

use crate::error::PlaylistError;

pub use timer::{Timer, TimerId};

/// Ordered timer list, validated once and never mutated afterwards
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    timers: Vec<Timer>,
}

impl Playlist {
    /// Build a playlist, rejecting zero durations and duplicate ids
    pub fn new(timers: Vec<Timer>) -> Result<Self, PlaylistError> {
        let mut seen = HashSet::with_capacity(timers.len());

        for timer in &timers {
            if timer.duration == 0 {
                return Err(PlaylistError::ZeroDuration {
                    title: timer.title.clone(),
                });
            }
            if !seen.insert(timer.id.clone()) {
                return Err(PlaylistError::DuplicateId(timer.id.to_string()));
            }
        }

        debug!("Playlist built with {} timers", timers.len());
        Ok(Self { timers })
    }

    /// The built-in catalog used when no playlist file is configured
    pub fn stub() -> Self {
        Self {
            timers: vec![
                Timer::new("First Timer", 3, 2),
                Timer::new("Second Timer", 4, 0),
                Timer::new("Third Timer", 5, 3),
            ],
        }
    }

    /// Parse a JSON array of timers
    pub fn from_json_str(json: &str) -> Result<Self, PlaylistError> {
        let timers: Vec<Timer> = serde_json::from_str(json)?;
        Self::new(timers)
    }

    /// Load a JSON playlist from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlaylistError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| PlaylistError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let playlist = Self::from_json_str(&json)?;
        info!("Loaded {} timers from {}", playlist.len(), path.display());
        Ok(playlist)
    }

    pub fn timers(&self) -> &[Timer] {
        &self.timers
    }

    pub fn get(&self, index: usize) -> Option<&Timer> {
        self.timers.get(index)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
