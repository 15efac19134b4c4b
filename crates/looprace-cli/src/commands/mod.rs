//! CLI command implementations

pub mod generate;
pub mod lap;
pub mod sample;
pub mod simulate;

use anyhow::{Context, Result};
use looprace_track::{Track, TrackConfig};
use std::path::Path;

/// Load a track file, or the built-in loop when no path is given.
pub fn load_track_config(path: Option<&str>) -> Result<TrackConfig> {
    match path {
        Some(path) => TrackConfig::load(Path::new(path))
            .with_context(|| format!("Failed to load track '{}'", path)),
        None => Ok(TrackConfig::default()),
    }
}

pub fn build_track(path: Option<&str>) -> Result<Track> {
    let config = load_track_config(path)?;
    Track::build(&config).context("Failed to build track")
}
