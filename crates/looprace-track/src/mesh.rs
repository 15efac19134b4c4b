//! Render hand-off: flat vertex arrays for the track loops and surface.
//!
//! Nothing here talks to a GPU. Each vertex is position, texture coordinate,
//! normal (8 floats) in that order, matching the layout the renderer binds
//! as attributes 0, 1 and 2.

use crate::track::Track;
use looprace_core::Vec3;

/// Floats per interleaved vertex.
pub const VERTEX_STRIDE: usize = 8;

const SURFACE_NORMAL: [f32; 3] = [0.0, 1.0, 0.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
}

impl TrackVertex {
    fn flat(position: Vec3, uv: [f32; 2]) -> Self {
        Self {
            position: position.to_array(),
            uv,
            normal: SURFACE_NORMAL,
        }
    }
}

/// Vertices for a point loop drawn as points or a line loop.
pub fn line_loop(points: &[Vec3]) -> Vec<TrackVertex> {
    points
        .iter()
        .map(|&p| TrackVertex::flat(p, [0.0, 0.0]))
        .collect()
}

/// Triangle strip between two matching edge loops.
///
/// Left and right vertices alternate per point, with `u` 0 on the left and 1
/// on the right and `v` counting points so the texture repeats along the
/// track. The first pair is appended again to close the strip, giving
/// `2 * n + 2` vertices.
pub fn surface_strip(left: &[Vec3], right: &[Vec3]) -> Vec<TrackVertex> {
    let n = left.len().min(right.len());
    if n == 0 {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity(2 * n + 2);
    for i in 0..n {
        let v = i as f32;
        vertices.push(TrackVertex::flat(left[i], [0.0, v]));
        vertices.push(TrackVertex::flat(right[i], [1.0, v]));
    }

    // Close the strip
    let v = n as f32;
    vertices.push(TrackVertex::flat(left[0], [0.0, v]));
    vertices.push(TrackVertex::flat(right[0], [1.0, v]));

    vertices
}

/// Triangle-list indices equivalent to a strip of `vertex_count` vertices.
///
/// Odd triangles swap their first two indices to keep a consistent winding.
pub fn strip_indices(vertex_count: usize) -> Vec<u32> {
    if vertex_count < 3 {
        return Vec::new();
    }

    let mut indices = Vec::with_capacity((vertex_count - 2) * 3);
    for i in 0..(vertex_count - 2) as u32 {
        if i % 2 == 0 {
            indices.extend_from_slice(&[i, i + 1, i + 2]);
        } else {
            indices.extend_from_slice(&[i + 1, i, i + 2]);
        }
    }
    indices
}

/// Interleave vertices into one float buffer of [`VERTEX_STRIDE`] floats each.
pub fn flatten(vertices: &[TrackVertex]) -> Vec<f32> {
    let mut data = Vec::with_capacity(vertices.len() * VERTEX_STRIDE);
    for v in vertices {
        data.extend_from_slice(&v.position);
        data.extend_from_slice(&v.uv);
        data.extend_from_slice(&v.normal);
    }
    data
}

/// All vertex arrays a renderer needs to draw a track.
#[derive(Debug, Clone)]
pub struct TrackMesh {
    pub centreline: Vec<TrackVertex>,
    pub left_edge: Vec<TrackVertex>,
    pub right_edge: Vec<TrackVertex>,
    pub left_lane: Vec<TrackVertex>,
    pub right_lane: Vec<TrackVertex>,
    /// Drawn as a triangle strip.
    pub surface: Vec<TrackVertex>,
}

impl TrackMesh {
    pub fn from_track(track: &Track) -> Self {
        let mesh = Self {
            centreline: line_loop(track.centreline_points()),
            left_edge: line_loop(track.left_edge()),
            right_edge: line_loop(track.right_edge()),
            left_lane: line_loop(track.left_lane()),
            right_lane: line_loop(track.right_lane()),
            surface: surface_strip(track.left_edge(), track.right_edge()),
        };
        log::debug!(
            "Track mesh: {} surface vertices, {} per loop",
            mesh.surface.len(),
            mesh.centreline.len()
        );
        mesh
    }

    pub fn surface_indices(&self) -> Vec<u32> {
        strip_indices(self.surface.len())
    }
}
