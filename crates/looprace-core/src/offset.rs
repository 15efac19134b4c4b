//! Per-point frames and lateral offset curves for closed loops.

use crate::Vec3;

/// Local basis at a loop point.
///
/// `tangent` points at the next point, `normal` is horizontal and points to
/// the right of travel, `binormal` completes the frame and points roughly up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub tangent: Vec3,
    pub normal: Vec3,
    pub binormal: Vec3,
}

impl Frame {
    /// Frame for travel along `tangent` relative to world up.
    ///
    /// A vertical tangent has no horizontal normal; normal and binormal are
    /// zero in that case.
    pub fn from_tangent(tangent: Vec3) -> Self {
        let tangent = tangent.normalized();
        let normal = tangent.cross(&Vec3::UP).normalized();
        let binormal = normal.cross(&tangent).normalized();
        Self {
            tangent,
            normal,
            binormal,
        }
    }

    /// Frame looking from `from` towards `to`.
    pub fn between(from: Vec3, to: Vec3) -> Self {
        Self::from_tangent(to - from)
    }

    /// Column-major model matrix with basis columns (tangent, binormal, normal)
    /// placed at `position`.
    pub fn to_matrix(&self, position: Vec3) -> [[f32; 4]; 4] {
        let t = self.tangent;
        let b = self.binormal;
        let n = self.normal;
        [
            [t.x, t.y, t.z, 0.0],
            [b.x, b.y, b.z, 0.0],
            [n.x, n.y, n.z, 0.0],
            [position.x, position.y, position.z, 1.0],
        ]
    }
}

/// One frame per point; the last point looks back at the first.
pub fn frames(points: &[Vec3]) -> Vec<Frame> {
    let n = points.len();
    (0..n)
        .map(|i| Frame::between(points[i], points[(i + 1) % n]))
        .collect()
}

/// Left and right loops displaced `half_width` along each point's normal.
pub fn offset_curves(points: &[Vec3], half_width: f32) -> (Vec<Vec3>, Vec<Vec3>) {
    offset_with_frames(points, &frames(points), half_width)
}

/// Same as [`offset_curves`] with frames that were already computed.
pub fn offset_with_frames(
    points: &[Vec3],
    frames: &[Frame],
    half_width: f32,
) -> (Vec<Vec3>, Vec<Vec3>) {
    points
        .iter()
        .zip(frames)
        .map(|(&p, frame)| {
            let offset = frame.normal * half_width;
            (p - offset, p + offset)
        })
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(n: usize, radius: f32) -> Vec<Vec3> {
        (0..n)
            .map(|i| {
                let a = i as f32 / n as f32 * std::f32::consts::TAU;
                Vec3::new(radius * a.cos(), 20.0, radius * a.sin())
            })
            .collect()
    }

    #[test]
    fn frame_is_orthonormal() {
        let f = Frame::from_tangent(Vec3::new(3.0, 0.5, -2.0));
        assert!((f.tangent.length() - 1.0).abs() < 1e-5);
        assert!((f.normal.length() - 1.0).abs() < 1e-5);
        assert!((f.binormal.length() - 1.0).abs() < 1e-5);
        assert!(f.tangent.dot(&f.normal).abs() < 1e-5);
        assert!(f.tangent.dot(&f.binormal).abs() < 1e-5);
        assert!(f.normal.dot(&f.binormal).abs() < 1e-5);
        assert!(f.binormal.y > 0.0);
    }

    #[test]
    fn normal_points_right_of_travel() {
        // Travelling along +x with y up, right is +z
        let f = Frame::from_tangent(Vec3::new(1.0, 0.0, 0.0));
        assert!((f.normal.z - 1.0).abs() < 1e-6);
        assert!((f.binormal.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn vertical_tangent_has_no_normal() {
        let f = Frame::from_tangent(Vec3::UP);
        assert_eq!(f.normal, Vec3::ZERO);
    }

    #[test]
    fn last_frame_wraps_to_first_point() {
        let pts = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, 10.0),
        ];
        let fs = frames(&pts);
        assert_eq!(fs.len(), 4);
        assert!((fs[3].tangent.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn offsets_span_full_width_around_centre() {
        let pts = circle(64, 100.0);
        let half_width = 35.0;
        let (left, right) = offset_curves(&pts, half_width);
        assert_eq!(left.len(), pts.len());
        assert_eq!(right.len(), pts.len());

        for i in 0..pts.len() {
            assert!((left[i].distance(&right[i]) - 2.0 * half_width).abs() < 1e-3);
            assert!(left[i].midpoint(&right[i]).distance(&pts[i]) < 1e-3);
        }
    }

    #[test]
    fn offsets_stay_level_on_flat_loop() {
        let (left, right) = offset_curves(&circle(32, 50.0), 10.0);
        assert!(left.iter().chain(&right).all(|p| (p.y - 20.0).abs() < 1e-4));
    }

    #[test]
    fn matrix_carries_basis_and_translation() {
        let f = Frame::from_tangent(Vec3::new(1.0, 0.0, 0.0));
        let m = f.to_matrix(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(m[3], [1.0, 2.0, 3.0, 1.0]);
    }
}
