//! Looprace Core - Closed-loop spline math for the racetrack
//!
//! This crate provides the pieces every other Looprace crate depends on:
//! - `Vec3` - Spatial vector type
//! - `spline` - Catmull-Rom interpolation, distance tables, arc-length
//!   sampling, two-pass uniform resampling, lap counting
//! - `offset` - Per-point frames and left/right offset curves
//! - Error types and Result alias

mod error;
pub mod offset;
pub mod spline;
mod types;

pub use error::{LoopError, Result};
pub use offset::Frame;
pub use spline::{ClosedSpline, SplinePoint};
pub use types::Vec3;
