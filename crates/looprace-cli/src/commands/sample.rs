//! Distance sampling command

use super::build_track;
use anyhow::{Context, Result};
use looprace_track::Lane;

pub fn run(track_path: Option<&str>, distance: f32, lane: Lane) -> Result<()> {
    let track = build_track(track_path)?;
    let point = track
        .sample_lane(distance, lane)
        .with_context(|| format!("Failed to sample {} lane at {}", lane, distance))?;

    let p = point.position;
    println!("position: {:.4}, {:.4}, {:.4}", p.x, p.y, p.z);
    if let Some(up) = point.up {
        println!("up:       {:.4}, {:.4}, {:.4}", up.x, up.y, up.z);
    }
    println!("lap:      {}", track.current_lap(distance));

    Ok(())
}
