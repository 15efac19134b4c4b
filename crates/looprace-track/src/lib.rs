//! Looprace Track - Racetrack geometry from a closed control loop
//!
//! Builds the resampled centreline, the left/right track edges and the
//! narrower object lanes from a [`TrackConfig`], answers distance queries
//! against them, and lays the loops out as flat vertex arrays. Does not
//! depend on any renderer: the arrays are handed off as-is.

pub mod config;
pub mod mesh;
pub mod track;

pub use config::{ControlPointDef, TrackConfig, TrackSettings};
pub use mesh::{TrackMesh, TrackVertex};
pub use track::{Lane, Track, TrackExport, TrackSummary};
