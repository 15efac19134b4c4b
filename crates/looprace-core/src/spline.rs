//! Closed-loop Catmull-Rom spline math, parametrised by arc length.
//!
//! A loop is an ordered set of points where the last point connects back to
//! the first. Positions along the loop are addressed by distance travelled,
//! measured on the control polygon through a cumulative distance table.
//! Sampling wraps around the seam, so any non-negative distance maps onto
//! the loop.

use crate::error::{LoopError, Result};
use crate::Vec3;

/// A Catmull-Rom segment needs two neighbours around the interpolated span.
pub const MIN_CONTROL_POINTS: usize = 4;

/// A point sampled from a loop, with its interpolated up vector when the
/// loop carries up vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplinePoint {
    pub position: Vec3,
    pub up: Option<Vec3>,
}

/// Uniform Catmull-Rom interpolation of the span between `p1` and `p2`.
///
/// `p0` and `p3` only shape the tangents. At `t = 0` the result is exactly `p1`.
pub fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;

    let a = p1;
    let b = (-p0 + p2) * 0.5;
    let c = (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * 0.5;
    let d = (-p0 + p1 * 3.0 - p2 * 3.0 + p3) * 0.5;

    a + b * t + c * t2 + d * t3
}

/// Cumulative arc lengths along a closed control polygon.
///
/// One entry per point (starting at 0) plus a closing entry for the edge from
/// the last point back to the first, so the final value is the perimeter.
/// An empty input gives an empty table.
pub fn distance_table(points: &[Vec3]) -> Vec<f32> {
    let Some(first) = points.first() else {
        return Vec::new();
    };

    let mut distances = Vec::with_capacity(points.len() + 1);
    let mut accumulated = 0.0_f32;
    distances.push(accumulated);
    for pair in points.windows(2) {
        accumulated += pair[0].distance(&pair[1]);
        distances.push(accumulated);
    }

    // Close the loop
    if let Some(last) = points.last() {
        accumulated += last.distance(first);
    }
    distances.push(accumulated);

    distances
}

/// Index `j` of the segment with `distances[j] <= length < distances[j + 1]`.
///
/// Binary search over the sorted table; zero-length segments are skipped
/// because they can never bracket a value.
fn segment_index(distances: &[f32], length: f32) -> Option<usize> {
    let upper = distances.partition_point(|&d| d <= length);
    if upper == 0 || upper >= distances.len() {
        return None;
    }
    Some(upper - 1)
}

/// Sample a closed loop at distance `d`, using `distances` as its pacing.
///
/// `d` wraps modulo the loop length, so a distance equal to the total length
/// lands back on the first point. `ups` is interpolated only when it has one
/// entry per point. The table must have exactly `points.len() + 1` entries;
/// anything else is reported as [`LoopError::PointSetMismatch`] instead of
/// indexing past either array.
pub fn sample_loop(
    points: &[Vec3],
    ups: Option<&[Vec3]>,
    distances: &[f32],
    d: f32,
) -> Result<SplinePoint> {
    if d < 0.0 || d.is_nan() {
        return Err(LoopError::InvalidDistance(d));
    }

    let m = points.len();
    if m == 0 {
        return Err(LoopError::EmptyPointSet);
    }
    if distances.len() != m + 1 {
        return Err(LoopError::PointSetMismatch {
            expected: distances.len().saturating_sub(1),
            actual: m,
        });
    }

    let total_length = distances[m];
    if total_length <= 0.0 || !total_length.is_finite() {
        return Err(LoopError::SegmentNotFound { distance: d });
    }

    // Handle laps: floored modulo keeps the result in [0, total_length)
    let length = d.rem_euclid(total_length);

    let j = segment_index(distances, length)
        .ok_or(LoopError::SegmentNotFound { distance: d })?;

    let segment_length = distances[j + 1] - distances[j];
    let t = (length - distances[j]) / segment_length;

    let prev = (j + m - 1) % m;
    let cur = j;
    let next = (j + 1) % m;
    let next_next = (j + 2) % m;

    let position = catmull_rom(points[prev], points[cur], points[next], points[next_next], t);
    let up = ups.filter(|u| u.len() == m).map(|u| {
        catmull_rom(u[prev], u[cur], u[next], u[next_next], t).normalized()
    });

    Ok(SplinePoint { position, up })
}

/// Lap index for a cumulative distance: `floor(distance / total_length)`.
///
/// A non-finite distance or an empty loop counts as lap 0.
pub fn current_lap(distance: f32, total_length: f32) -> i32 {
    if total_length <= 0.0 || !distance.is_finite() {
        return 0;
    }
    (distance / total_length).floor() as i32
}

/// Standard deviation of the consecutive spacings around a closed loop,
/// including the closing edge.
pub fn spacing_std_dev(points: &[Vec3]) -> f32 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }

    let spacings: Vec<f32> = (0..n)
        .map(|i| points[i].distance(&points[(i + 1) % n]))
        .collect();
    let mean = spacings.iter().sum::<f32>() / n as f32;
    let variance = spacings.iter().map(|s| (s - mean) * (s - mean)).sum::<f32>() / n as f32;
    variance.sqrt()
}

/// A closed Catmull-Rom loop with its distance table.
///
/// The table is derived on construction and never goes stale: resampling
/// produces a new spline rather than mutating this one.
#[derive(Debug, Clone)]
pub struct ClosedSpline {
    points: Vec<Vec3>,
    ups: Option<Vec<Vec3>>,
    distances: Vec<f32>,
}

impl ClosedSpline {
    /// Build a loop from at least [`MIN_CONTROL_POINTS`] points.
    pub fn new(points: Vec<Vec3>) -> Result<Self> {
        if points.len() < MIN_CONTROL_POINTS {
            return Err(LoopError::TooFewControlPoints {
                got: points.len(),
                min: MIN_CONTROL_POINTS,
            });
        }
        let distances = distance_table(&points);
        Ok(Self {
            points,
            ups: None,
            distances,
        })
    }

    /// Build a loop that also interpolates one up vector per point.
    pub fn with_up_vectors(points: Vec<Vec3>, ups: Vec<Vec3>) -> Result<Self> {
        if ups.len() != points.len() {
            return Err(LoopError::PointSetMismatch {
                expected: points.len(),
                actual: ups.len(),
            });
        }
        let mut spline = Self::new(points)?;
        spline.ups = Some(ups);
        Ok(spline)
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn up_vectors(&self) -> Option<&[Vec3]> {
        self.ups.as_deref()
    }

    pub fn distances(&self) -> &[f32] {
        &self.distances
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Perimeter of the control polygon.
    pub fn total_length(&self) -> f32 {
        self.distances.last().copied().unwrap_or(0.0)
    }

    /// Point (and up vector, if present) at distance `d` along the loop.
    pub fn sample(&self, d: f32) -> Result<SplinePoint> {
        sample_loop(&self.points, self.up_vectors(), &self.distances, d)
    }

    /// Sample a different loop with this spline's distance table.
    ///
    /// Used for lanes offset from the centreline: `alt` must have the same
    /// number of points as this spline and is assumed to share its pacing.
    /// A loop of a different size fails with [`LoopError::PointSetMismatch`].
    pub fn sample_alternate(&self, d: f32, alt: &[Vec3]) -> Result<SplinePoint> {
        if !alt.is_empty() && alt.len() != self.points.len() {
            return Err(LoopError::PointSetMismatch {
                expected: self.points.len(),
                actual: alt.len(),
            });
        }
        sample_loop(alt, self.up_vectors(), &self.distances, d)
    }

    /// Lap index (from 0) for a cumulative distance travelled.
    pub fn current_lap(&self, distance: f32) -> i32 {
        current_lap(distance, self.total_length())
    }

    /// One resampling pass: `count` points at equal steps of control-polygon
    /// distance.
    pub fn resample(&self, count: usize) -> Result<ClosedSpline> {
        if count < MIN_CONTROL_POINTS {
            return Err(LoopError::TooFewControlPoints {
                got: count,
                min: MIN_CONTROL_POINTS,
            });
        }

        let spacing = self.total_length() / count as f32;
        let mut points = Vec::with_capacity(count);
        let mut ups = self.ups.as_ref().map(|_| Vec::with_capacity(count));

        for i in 0..count {
            let sample = self.sample(i as f32 * spacing)?;
            points.push(sample.position);
            if let (Some(ups), Some(up)) = (ups.as_mut(), sample.up) {
                ups.push(up);
            }
        }

        match ups {
            Some(ups) => ClosedSpline::with_up_vectors(points, ups),
            None => ClosedSpline::new(points),
        }
    }

    /// Resample to `count` approximately arc-length-uniform points.
    ///
    /// Each pass resamples the output of the previous one against a freshly
    /// built distance table. The first pass still carries the length bias of
    /// the cubic parametrisation; further passes flatten it out. This is a
    /// heuristic, not an exact uniformisation, and `passes` is a tuning knob
    /// (two is the usual setting).
    pub fn uniform_resample(&self, count: usize, passes: usize) -> Result<ClosedSpline> {
        if passes == 0 {
            return Err(LoopError::InvalidConfig(
                "resampling needs at least one pass".to_string(),
            ));
        }

        let mut spline = self.resample(count)?;
        for _ in 1..passes {
            spline = spline.resample(count)?;
        }
        Ok(spline)
    }
}
