//! Track generation command

use super::build_track;
use anyhow::{Context, Result};

pub fn run(track_path: Option<&str>, format: &str, output: Option<&str>) -> Result<()> {
    let track = build_track(track_path)?;

    let text = match format {
        "text" => {
            let summary = track.summary();
            let mut text = String::new();
            text.push_str(&format!("Control points:    {}\n", summary.control_points));
            text.push_str(&format!("Centreline points: {}\n", summary.centreline_points));
            text.push_str(&format!("Control length:    {:.2}\n", summary.control_length));
            text.push_str(&format!("Track length:      {:.2}\n", summary.total_length));
            text.push_str(&format!("Spacing std-dev:   {:.4}\n", summary.spacing_std_dev));
            text.push_str(&format!("Half width:        {:.2}\n", summary.half_width));
            text.push_str(&format!("Lane offset:       {:.2}\n", summary.lane_half_width));
            text
        }
        "json" => serde_json::to_string_pretty(&track.export())? + "\n",
        _ => anyhow::bail!("Unknown format: {}", format),
    };

    match output {
        Some(path) => {
            std::fs::write(path, &text).with_context(|| format!("Failed to write '{}'", path))?;
            println!("Wrote {}", path);
        }
        None => print!("{}", text),
    }

    Ok(())
}
