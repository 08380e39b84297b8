//! Walkable triangle surface
//!
//! A point on the surface is a triangle (three vertex indices) plus
//! barycentric weights. When a point sits on a triangle edge, that edge is
//! always `(indices.x, indices.y)` and `weights.z` is exactly zero; both
//! `walk_in_triangle` and `cross_edge` rely on this.

use std::collections::HashMap;

use glam::{Quat, UVec3, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Squared cross-product length below which a triangle counts as degenerate
const DEGENERATE_AREA_SQ: f32 = 1e-12;

/// A position on the walk surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkPoint {
    /// Triangle corners (indices into the mesh vertex list)
    pub indices: UVec3,
    /// Barycentric weights for `indices`, each in [0, 1], summing to 1
    pub weights: Vec3,
}

impl WalkPoint {
    pub fn new(indices: UVec3, weights: Vec3) -> Self {
        Self { indices, weights }
    }

    /// Barycentric invariant check with tolerance `eps`
    pub fn is_normalized(&self, eps: f32) -> bool {
        self.weights.min_element() >= -eps
            && self.weights.max_element() <= 1.0 + eps
            && (self.weights.element_sum() - 1.0).abs() <= eps
    }

    /// Same point, with corners cyclically shifted so corner `i` lands in `z`
    fn with_corner_last(&self, i: usize) -> Self {
        let (idx, w) = (self.indices, self.weights);
        match i {
            0 => Self::new(
                UVec3::new(idx.y, idx.z, idx.x),
                Vec3::new(w.y, w.z, w.x),
            ),
            1 => Self::new(
                UVec3::new(idx.z, idx.x, idx.y),
                Vec3::new(w.z, w.x, w.y),
            ),
            _ => *self,
        }
    }
}

/// Queries the locomotion code needs from a walking surface
pub trait WalkSurface {
    /// Closest surface point to a world-space point
    fn nearest_walk_point(&self, world_point: Vec3) -> WalkPoint;

    /// Move from `start` along `step` without leaving the current triangle.
    ///
    /// Returns the end point and the fraction of `step` consumed. A fraction
    /// of exactly 1.0 means the whole step fit inside the triangle; anything
    /// less means the end point is on edge `(x, y)`.
    fn walk_in_triangle(&self, start: &WalkPoint, step: Vec3) -> (WalkPoint, f32);

    /// Step across edge `(x, y)` into the neighbouring triangle, if any.
    ///
    /// The quaternion rotates the old face normal onto the new one.
    fn cross_edge(&self, start: &WalkPoint) -> Option<(WalkPoint, Quat)>;

    fn to_world_point(&self, at: &WalkPoint) -> Vec3;

    /// Interpolated vertex normal at `at` (unit length)
    fn to_world_smooth_normal(&self, at: &WalkPoint) -> Vec3;

    /// World-space corners of the triangle `at` lies on, in index order
    fn triangle_vertices(&self, at: &WalkPoint) -> [Vec3; 3];
}

/// Errors raised while building a walk mesh
#[derive(Debug, Error)]
pub enum WalkMeshError {
    #[error("walk mesh has no triangles")]
    Empty,
    #[error("vertex/normal count mismatch ({vertices} vertices, {normals} normals)")]
    NormalCount { vertices: usize, normals: usize },
    #[error("triangle {triangle} references vertex {index} ({count} vertices)")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        count: usize,
    },
    #[error("triangle {0} is degenerate")]
    Degenerate(usize),
    #[error("directed edge ({0}, {1}) is used by more than one triangle")]
    DuplicateEdge(u32, u32),
    #[error("parse error")]
    Serde(#[from] serde_json::Error),
}

/// On-disk layout accepted by [`WalkMesh::from_json`]
#[derive(Debug, Deserialize)]
struct WalkMeshDoc {
    vertices: Vec<Vec3>,
    normals: Vec<Vec3>,
    triangles: Vec<UVec3>,
}

/// Triangle mesh with edge adjacency
#[derive(Debug, Clone)]
pub struct WalkMesh {
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub triangles: Vec<UVec3>,
    /// Directed edge (a, b) -> third vertex of the triangle using that edge
    next_vertex: HashMap<(u32, u32), u32>,
}

impl WalkMesh {
    /// Build a mesh, validating indices and consistent winding
    pub fn new(
        vertices: Vec<Vec3>,
        normals: Vec<Vec3>,
        triangles: Vec<UVec3>,
    ) -> Result<Self, WalkMeshError> {
        if triangles.is_empty() {
            return Err(WalkMeshError::Empty);
        }
        if vertices.len() != normals.len() {
            return Err(WalkMeshError::NormalCount {
                vertices: vertices.len(),
                normals: normals.len(),
            });
        }

        let mut next_vertex = HashMap::with_capacity(triangles.len() * 3);
        for (t, tri) in triangles.iter().enumerate() {
            if let Some(&index) = tri
                .to_array()
                .iter()
                .find(|&&i| i as usize >= vertices.len())
            {
                return Err(WalkMeshError::IndexOutOfRange {
                    triangle: t,
                    index,
                    count: vertices.len(),
                });
            }

            let (a, b, c) = (
                vertices[tri.x as usize],
                vertices[tri.y as usize],
                vertices[tri.z as usize],
            );
            if (b - a).cross(c - a).length_squared() < DEGENERATE_AREA_SQ {
                return Err(WalkMeshError::Degenerate(t));
            }

            for (x, y, z) in [
                (tri.x, tri.y, tri.z),
                (tri.y, tri.z, tri.x),
                (tri.z, tri.x, tri.y),
            ] {
                if next_vertex.insert((x, y), z).is_some() {
                    return Err(WalkMeshError::DuplicateEdge(x, y));
                }
            }
        }

        log::debug!(
            "Walk mesh: {} vertices, {} triangles",
            vertices.len(),
            triangles.len()
        );

        Ok(Self {
            vertices,
            normals,
            triangles,
            next_vertex,
        })
    }

    /// Parse a `{ "vertices": [...], "normals": [...], "triangles": [...] }` document
    pub fn from_json(json: &str) -> Result<Self, WalkMeshError> {
        let doc: WalkMeshDoc = serde_json::from_str(json)?;
        Self::new(doc.vertices, doc.normals, doc.triangles)
    }

    /// Flat `cells` x `cells` square grid of side `size`, centered on the
    /// origin in the z = 0 plane, normals +z
    pub fn grid(cells: u32, size: f32) -> Result<Self, WalkMeshError> {
        let row = cells + 1;
        let half = size * 0.5;
        let cell = size / cells.max(1) as f32;

        let mut vertices = Vec::with_capacity((row * row) as usize);
        for j in 0..row {
            for i in 0..row {
                vertices.push(Vec3::new(
                    -half + i as f32 * cell,
                    -half + j as f32 * cell,
                    0.0,
                ));
            }
        }
        let normals = vec![Vec3::Z; vertices.len()];

        let mut triangles = Vec::with_capacity((cells * cells * 2) as usize);
        for j in 0..cells {
            for i in 0..cells {
                let v00 = j * row + i;
                let v10 = v00 + 1;
                let v01 = v00 + row;
                let v11 = v01 + 1;
                triangles.push(UVec3::new(v00, v10, v11));
                triangles.push(UVec3::new(v00, v11, v01));
            }
        }

        Self::new(vertices, normals, triangles)
    }

    fn corners(&self, tri: UVec3) -> [Vec3; 3] {
        [
            self.vertices[tri.x as usize],
            self.vertices[tri.y as usize],
            self.vertices[tri.z as usize],
        ]
    }

    fn face_normal(&self, tri: UVec3) -> Vec3 {
        let [a, b, c] = self.corners(tri);
        (b - a).cross(c - a).normalize()
    }
}

impl WalkSurface for WalkMesh {
    fn nearest_walk_point(&self, world_point: Vec3) -> WalkPoint {
        // new() guarantees at least one triangle
        let mut best = (f32::INFINITY, WalkPoint::new(self.triangles[0], Vec3::X));

        for &tri in &self.triangles {
            let [a, b, c] = self.corners(tri);
            let weights = closest_weights(a, b, c, world_point);
            let point = a * weights.x + b * weights.y + c * weights.z;
            let dist = point.distance_squared(world_point);
            if dist < best.0 {
                best = (dist, WalkPoint::new(tri, weights));
            }
        }

        best.1
    }

    fn walk_in_triangle(&self, start: &WalkPoint, step: Vec3) -> (WalkPoint, f32) {
        let [a, b, c] = self.corners(start.indices);

        // Barycentric weights are affine, so this is the per-unit-time change
        let velocity = barycentric_weights(a, b, c, a + step) - Vec3::X;

        let mut time = 1.0_f32;
        let mut exit = None;
        for i in 0..3 {
            if velocity[i] < 0.0 {
                let t = (-start.weights[i] / velocity[i]).max(0.0);
                if t < time {
                    time = t;
                    exit = Some(i);
                }
            }
        }

        let mut weights = start.weights + velocity * time;
        match exit {
            None => (
                WalkPoint::new(start.indices, renormalize(weights)),
                1.0,
            ),
            Some(i) => {
                weights[i] = 0.0;
                let end = WalkPoint::new(start.indices, renormalize(weights));
                (end.with_corner_last(i), time)
            }
        }
    }

    fn cross_edge(&self, start: &WalkPoint) -> Option<(WalkPoint, Quat)> {
        if start.weights.z != 0.0 {
            return None;
        }

        let (x, y) = (start.indices.x, start.indices.y);
        let z = *self.next_vertex.get(&(y, x))?;

        let end = WalkPoint::new(
            UVec3::new(y, x, z),
            Vec3::new(start.weights.y, start.weights.x, 0.0),
        );
        let rotation = Quat::from_rotation_arc(
            self.face_normal(start.indices),
            self.face_normal(end.indices),
        );
        Some((end, rotation))
    }

    fn to_world_point(&self, at: &WalkPoint) -> Vec3 {
        let [a, b, c] = self.corners(at.indices);
        a * at.weights.x + b * at.weights.y + c * at.weights.z
    }

    fn to_world_smooth_normal(&self, at: &WalkPoint) -> Vec3 {
        let i = at.indices;
        let n = self.normals[i.x as usize] * at.weights.x
            + self.normals[i.y as usize] * at.weights.y
            + self.normals[i.z as usize] * at.weights.z;
        n.normalize_or(self.face_normal(i))
    }

    fn triangle_vertices(&self, at: &WalkPoint) -> [Vec3; 3] {
        self.corners(at.indices)
    }
}

/// Barycentric weights of `pt` projected onto the plane of triangle (a, b, c)
pub fn barycentric_weights(a: Vec3, b: Vec3, c: Vec3, pt: Vec3) -> Vec3 {
    let n = (b - a).cross(c - a);
    let inv = 1.0 / n.length_squared();
    let wa = (c - b).cross(pt - b).dot(n) * inv;
    let wb = (a - c).cross(pt - c).dot(n) * inv;
    Vec3::new(wa, wb, 1.0 - wa - wb)
}

/// Weights of the point on triangle (a, b, c) closest to `pt`
fn closest_weights(a: Vec3, b: Vec3, c: Vec3, pt: Vec3) -> Vec3 {
    let inside = barycentric_weights(a, b, c, pt);
    if inside.min_element() >= 0.0 {
        return inside;
    }

    // Outside the triangle: best of the three edges
    let corners = [a, b, c];
    let mut best = (f32::INFINITY, Vec3::X);
    for (i, j) in [(0, 1), (1, 2), (2, 0)] {
        let (p, q) = (corners[i], corners[j]);
        let edge = q - p;
        let t = ((pt - p).dot(edge) / edge.length_squared()).clamp(0.0, 1.0);
        let dist = (p + edge * t).distance_squared(pt);
        if dist < best.0 {
            let mut w = Vec3::ZERO;
            w[i] = 1.0 - t;
            w[j] = t;
            best = (dist, w);
        }
    }
    best.1
}

/// Clamp away float noise below zero and rescale to sum 1
fn renormalize(weights: Vec3) -> Vec3 {
    let w = weights.max(Vec3::ZERO);
    let sum = w.element_sum();
    if sum > 0.0 { w / sum } else { Vec3::X }
}
