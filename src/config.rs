//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::{error::PlaylistError, playlist::Playlist, runner::RepeatPolicy};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "timer-playlist")]
#[command(about = "Runs an ordered playlist of repeating timers with HTTP transport controls")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Length of one logical tick in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// JSON playlist file; the built-in catalog is used when omitted
    #[arg(long)]
    pub playlist: Option<PathBuf>,

    /// Minimum repeat count a timer needs to become active
    #[arg(long, default_value = "0")]
    pub min_repeat: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn repeat_policy(&self) -> RepeatPolicy {
        RepeatPolicy::require_repeats(self.min_repeat)
    }

    /// Load the configured playlist, falling back to the built-in catalog
    pub fn load_playlist(&self) -> Result<Playlist, PlaylistError> {
        match &self.playlist {
            Some(path) => Playlist::load(path),
            None => Ok(Playlist::stub()),
        }
    }
}
