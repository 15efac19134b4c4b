//! Lap lookup command

use super::build_track;
use anyhow::Result;

pub fn run(track_path: Option<&str>, distance: f32) -> Result<()> {
    let track = build_track(track_path)?;
    println!("{}", track.current_lap(distance));
    Ok(())
}
