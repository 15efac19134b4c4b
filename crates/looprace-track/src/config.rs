//! Track configuration, parsed from `.track.toml` files

use looprace_core::spline::MIN_CONTROL_POINTS;
use looprace_core::{LoopError, Result, Vec3};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A hand-placed anchor of the track loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlPointDef {
    pub position: [f32; 3],
    /// Optional up vector; either every control point has one or none do.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up: Option<[f32; 3]>,
}

impl ControlPointDef {
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: [x, y, z],
            up: None,
        }
    }
}

/// Shape parameters of the generated track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackSettings {
    /// Full track width; the edges sit at `width / 2` either side.
    pub width: f32,
    /// Object lanes sit at `width / lane_divisor` either side.
    pub lane_divisor: f32,
    /// Number of centreline points.
    pub samples: usize,
    /// Number of uniform resampling passes.
    pub passes: usize,
}

impl Default for TrackSettings {
    fn default() -> Self {
        Self {
            width: 70.0,
            lane_divisor: 3.5,
            samples: 500,
            passes: 2,
        }
    }
}

/// Complete description of a track loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackConfig {
    #[serde(default)]
    pub track: TrackSettings,
    pub control_points: Vec<ControlPointDef>,
}

impl Default for TrackConfig {
    /// The built-in circuit: twelve anchors at y = 20.
    fn default() -> Self {
        let control_points = [
            (100.0, 0.0),
            (250.0, 300.0),
            (100.0, 600.0),
            (-150.0, 400.0),
            (-300.0, 520.0),
            (-600.0, 300.0),
            (-600.0, -500.0),
            (-400.0, -550.0),
            (-300.0, -200.0),
            (-100.0, -300.0),
            (-100.0, -700.0),
            (400.0, -600.0),
        ]
        .iter()
        .map(|&(x, z)| ControlPointDef::at(x, 20.0, z))
        .collect();

        Self {
            track: TrackSettings::default(),
            control_points,
        }
    }
}

impl TrackConfig {
    /// Parse and validate a track from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TrackConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a `.track.toml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| LoopError::InvalidConfig(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        let count = self.control_points.len();
        if count < MIN_CONTROL_POINTS {
            return Err(LoopError::TooFewControlPoints {
                got: count,
                min: MIN_CONTROL_POINTS,
            });
        }

        let settings = &self.track;
        if settings.width.is_nan() || settings.width <= 0.0 {
            return Err(LoopError::InvalidConfig(format!(
                "track width must be positive, got {}",
                settings.width
            )));
        }
        if settings.lane_divisor.is_nan() || settings.lane_divisor <= 2.0 {
            return Err(LoopError::InvalidConfig(format!(
                "lane_divisor must be greater than 2 so lanes sit inside the edges, got {}",
                settings.lane_divisor
            )));
        }
        if settings.samples < MIN_CONTROL_POINTS {
            return Err(LoopError::InvalidConfig(format!(
                "samples must be at least {}, got {}",
                MIN_CONTROL_POINTS, settings.samples
            )));
        }
        if settings.passes == 0 {
            return Err(LoopError::InvalidConfig(
                "passes must be at least 1".to_string(),
            ));
        }

        let with_up = self.control_points.iter().filter(|p| p.up.is_some()).count();
        if with_up != 0 && with_up != count {
            return Err(LoopError::InvalidConfig(format!(
                "{} of {} control points have an up vector; give all or none",
                with_up, count
            )));
        }

        Ok(())
    }

    pub fn half_width(&self) -> f32 {
        self.track.width / 2.0
    }

    pub fn lane_half_width(&self) -> f32 {
        self.track.width / self.track.lane_divisor
    }

    pub fn control_positions(&self) -> Vec<Vec3> {
        self.control_points
            .iter()
            .map(|p| Vec3::from_array(p.position))
            .collect()
    }

    /// Up vectors, when every control point carries one.
    pub fn control_up_vectors(&self) -> Option<Vec<Vec3>> {
        self.control_points
            .iter()
            .map(|p| p.up.map(Vec3::from_array))
            .collect()
    }
}
