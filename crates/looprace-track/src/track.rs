//! Track construction and distance queries

use crate::config::TrackConfig;
use looprace_core::offset::{frames, offset_with_frames};
use looprace_core::spline::{spacing_std_dev, ClosedSpline, SplinePoint};
use looprace_core::{Frame, LoopError, Result, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which loop a ship or pickup follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lane {
    Left,
    #[default]
    Centre,
    Right,
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Lane::Left => "left",
            Lane::Centre => "centre",
            Lane::Right => "right",
        };
        f.write_str(name)
    }
}

impl FromStr for Lane {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "left" => Ok(Lane::Left),
            "centre" | "center" => Ok(Lane::Centre),
            "right" => Ok(Lane::Right),
            _ => Err(format!(
                "unknown lane '{}'; valid values: left, centre, right",
                s
            )),
        }
    }
}

/// A built track: the resampled centreline with its edges and object lanes.
///
/// Everything is computed once in [`Track::build`] and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Track {
    control: ClosedSpline,
    centreline: ClosedSpline,
    frames: Vec<Frame>,
    left_edge: Vec<Vec3>,
    right_edge: Vec<Vec3>,
    left_lane: Vec<Vec3>,
    right_lane: Vec<Vec3>,
    half_width: f32,
    lane_half_width: f32,
}

impl Track {
    pub fn build(config: &TrackConfig) -> Result<Self> {
        config.validate()?;

        let positions = config.control_positions();
        let control = match config.control_up_vectors() {
            Some(ups) => ClosedSpline::with_up_vectors(positions, ups)?,
            None => ClosedSpline::new(positions)?,
        };

        let centreline = control.uniform_resample(config.track.samples, config.track.passes)?;
        let frames = frames(centreline.points());

        let half_width = config.half_width();
        let lane_half_width = config.lane_half_width();
        let (left_edge, right_edge) = offset_with_frames(centreline.points(), &frames, half_width);
        let (left_lane, right_lane) =
            offset_with_frames(centreline.points(), &frames, lane_half_width);

        log::info!(
            "Built track: {} control points -> {} centreline points, length {:.1} (spacing std-dev {:.4})",
            control.len(),
            centreline.len(),
            centreline.total_length(),
            spacing_std_dev(centreline.points()),
        );

        Ok(Self {
            control,
            centreline,
            frames,
            left_edge,
            right_edge,
            left_lane,
            right_lane,
            half_width,
            lane_half_width,
        })
    }

    /// The hand-placed loop the centreline was resampled from.
    pub fn control(&self) -> &ClosedSpline {
        &self.control
    }

    pub fn centreline(&self) -> &ClosedSpline {
        &self.centreline
    }

    pub fn centreline_points(&self) -> &[Vec3] {
        self.centreline.points()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn left_edge(&self) -> &[Vec3] {
        &self.left_edge
    }

    pub fn right_edge(&self) -> &[Vec3] {
        &self.right_edge
    }

    pub fn left_lane(&self) -> &[Vec3] {
        &self.left_lane
    }

    pub fn right_lane(&self) -> &[Vec3] {
        &self.right_lane
    }

    pub fn half_width(&self) -> f32 {
        self.half_width
    }

    pub fn lane_half_width(&self) -> f32 {
        self.lane_half_width
    }

    /// Points of the loop followed in `lane`.
    pub fn lane_points(&self, lane: Lane) -> &[Vec3] {
        match lane {
            Lane::Left => &self.left_lane,
            Lane::Centre => self.centreline.points(),
            Lane::Right => &self.right_lane,
        }
    }

    /// Centreline length; one lap.
    pub fn total_length(&self) -> f32 {
        self.centreline.total_length()
    }

    /// Centreline point at distance `d`.
    pub fn sample(&self, d: f32) -> Result<SplinePoint> {
        self.centreline.sample(d)
    }

    /// Point at distance `d` on the loop for `lane`, paced by the centreline.
    pub fn sample_lane(&self, d: f32, lane: Lane) -> Result<SplinePoint> {
        match lane {
            Lane::Centre => self.centreline.sample(d),
            _ => self.centreline.sample_alternate(d, self.lane_points(lane)),
        }
    }

    /// Position and frame of travel at `d` in `lane`, looking `lookahead` further on.
    pub fn frame_at(&self, d: f32, lane: Lane, lookahead: f32) -> Result<(Vec3, Frame)> {
        if lookahead.is_nan() || lookahead <= 0.0 {
            return Err(LoopError::InvalidDistance(lookahead));
        }
        let here = self.sample_lane(d, lane)?.position;
        let ahead = self.sample_lane(d + lookahead, lane)?.position;
        Ok((here, Frame::between(here, ahead)))
    }

    pub fn current_lap(&self, d: f32) -> i32 {
        self.centreline.current_lap(d)
    }

    pub fn summary(&self) -> TrackSummary {
        TrackSummary {
            control_points: self.control.len(),
            centreline_points: self.centreline.len(),
            control_length: self.control.total_length(),
            total_length: self.total_length(),
            spacing_std_dev: spacing_std_dev(self.centreline.points()),
            half_width: self.half_width,
            lane_half_width: self.lane_half_width,
        }
    }

    /// Point loops and distance table for hand-off to a renderer or tool.
    pub fn export(&self) -> TrackExport {
        let arrays = |pts: &[Vec3]| pts.iter().map(Vec3::to_array).collect::<Vec<_>>();
        TrackExport {
            summary: self.summary(),
            distances: self.centreline.distances().to_vec(),
            centreline: arrays(self.centreline.points()),
            left_edge: arrays(&self.left_edge),
            right_edge: arrays(&self.right_edge),
            left_lane: arrays(&self.left_lane),
            right_lane: arrays(&self.right_lane),
        }
    }
}

/// Headline numbers of a built track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackSummary {
    pub control_points: usize,
    pub centreline_points: usize,
    pub control_length: f32,
    pub total_length: f32,
    pub spacing_std_dev: f32,
    pub half_width: f32,
    pub lane_half_width: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackExport {
    pub summary: TrackSummary,
    pub distances: Vec<f32>,
    pub centreline: Vec<[f32; 3]>,
    pub left_edge: Vec<[f32; 3]>,
    pub right_edge: Vec<[f32; 3]>,
    pub left_lane: Vec<[f32; 3]>,
    pub right_lane: Vec<[f32; 3]>,
}
