//! Error types for Looprace

use thiserror::Error;

/// The main error type for Looprace operations
#[derive(Debug, Error)]
pub enum LoopError {
    #[error("Invalid distance: {0} (distances along the loop must be non-negative)")]
    InvalidDistance(f32),

    #[error("Empty point set: no control points configured")]
    EmptyPointSet,

    #[error("No segment brackets distance {distance} (distance table is malformed)")]
    SegmentNotFound { distance: f32 },

    /// An alternate point loop was sampled against a distance table built for
    /// a loop of a different size.
    #[error("Point set mismatch: distance table covers {expected} points, got {actual}")]
    PointSetMismatch { expected: usize, actual: usize },

    #[error("Too few control points: got {got}, need at least {min}")]
    TooFewControlPoints { got: usize, min: usize },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),
}

/// Result type alias for Looprace operations
pub type Result<T> = std::result::Result<T, LoopError>;

impl From<toml::de::Error> for LoopError {
    fn from(err: toml::de::Error) -> Self {
        LoopError::TomlParse(err.to_string())
    }
}

impl LoopError {
    /// True for the failures a per-frame caller is expected to skip over
    /// (keep the previous position) rather than abort on.
    pub fn is_sampling_failure(&self) -> bool {
        matches!(
            self,
            LoopError::InvalidDistance(_)
                | LoopError::EmptyPointSet
                | LoopError::SegmentNotFound { .. }
                | LoopError::PointSetMismatch { .. }
        )
    }
}
