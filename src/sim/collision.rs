//! Wall collision response for walking
//!
//! When a step runs into a boundary edge of the walk mesh, the remaining
//! step is bent back into the triangle instead of being dropped, so the
//! player slides along walls.

use glam::Vec3;

use crate::consts::{WALL_BOUNCE, WALL_NUDGE};

/// Frame of a boundary edge, derived from the triangle it belongs to
#[derive(Debug, Clone, Copy)]
pub struct WallFrame {
    /// Unit tangent from the first to the second edge vertex
    pub along: Vec3,
    /// Unit face normal of the triangle
    pub normal: Vec3,
    /// In-plane unit vector perpendicular to the edge, pointing into the triangle
    pub inward: Vec3,
}

impl WallFrame {
    /// Frame for edge (a, b) of triangle (a, b, c) wound counter-clockwise
    /// around its normal
    pub fn from_triangle([a, b, c]: [Vec3; 3]) -> Self {
        let along = (b - a).normalize();
        let normal = (b - a).cross(c - a).normalize();
        let inward = normal.cross(along);
        Self {
            along,
            normal,
            inward,
        }
    }

    /// Signed amount of `v` pointing into the triangle
    #[inline]
    pub fn inward_component(&self, v: Vec3) -> f32 {
        v.dot(self.inward)
    }
}

/// Redirect the remaining step after hitting edge (a, b) of `triangle`
///
/// Steps pointing out through the wall are pushed back past parallel
/// (`WALL_BOUNCE`), so the next attempt does not hit the same edge again.
/// Steps already running along or away from the wall get a small
/// `WALL_NUDGE` off it.
pub fn wall_response(triangle: [Vec3; 3], remain: Vec3) -> Vec3 {
    let wall = WallFrame::from_triangle(triangle);
    let d = wall.inward_component(remain);
    if d < 0.0 {
        remain + (-WALL_BOUNCE * d) * wall.inward
    } else {
        remain + (WALL_NUDGE * d) * wall.inward
    }
}
