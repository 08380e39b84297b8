//! Walking across the walk mesh
//!
//! A frame's displacement is consumed triangle by triangle. Each iteration
//! either finishes inside the current triangle, crosses an edge into the
//! neighbour, or bounces off a boundary wall. The iteration count is
//! capped; whatever is left when the cap is hit is dropped for this frame.

use glam::{Affine3A, Vec2, Vec3};

use super::collision::wall_response;
use crate::walkmesh::{WalkPoint, WalkSurface};

/// Result of walking one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkOutcome {
    /// Where the player ended up
    pub at: WalkPoint,
    /// Displacement left over when the iteration budget ran out (zero otherwise)
    pub dropped: Vec3,
    /// Triangle steps taken
    pub iterations: u32,
    /// Boundary walls hit along the way
    pub wall_hits: u32,
}

impl WalkOutcome {
    /// True if the frame's movement was cut short by the iteration budget
    pub fn truncated(&self) -> bool {
        self.dropped != Vec3::ZERO
    }
}

/// Local-frame move for one frame: +x right, +y forward
///
/// Axes come in as -1, 0 or 1. Diagonal input is normalized so it is not
/// faster than a single axis.
pub fn local_move(axes: Vec2, speed: f32, elapsed: f32) -> Vec2 {
    if axes == Vec2::ZERO {
        Vec2::ZERO
    } else {
        axes.normalize() * speed * elapsed
    }
}

/// Turn a local move into a world displacement (direction only)
pub fn world_step(local_to_world: &Affine3A, local: Vec2) -> Vec3 {
    local_to_world.transform_vector3(Vec3::new(local.x, local.y, 0.0))
}

/// Walk from `start` along `step`, taking at most `budget` triangle steps
///
/// The leftover step is carried into a neighbouring triangle without being
/// rotated into its plane.
pub fn walk<S: WalkSurface + ?Sized>(
    surface: &S,
    start: WalkPoint,
    step: Vec3,
    budget: u32,
) -> WalkOutcome {
    let mut at = start;
    let mut remain = step;
    let mut iterations = 0;
    let mut wall_hits = 0;

    for _ in 0..budget {
        if remain == Vec3::ZERO {
            break;
        }
        iterations += 1;

        let (end, time) = surface.walk_in_triangle(&at, remain);
        at = end;
        if time == 1.0 {
            remain = Vec3::ZERO;
            break;
        }

        remain *= 1.0 - time;

        if let Some((next, _rotation)) = surface.cross_edge(&at) {
            log::trace!("walk: crossed into {:?}", next.indices);
            at = next;
        } else {
            wall_hits += 1;
            remain = wall_response(surface.triangle_vertices(&at), remain);
            log::trace!("walk: wall at {:?}, remain {remain}", at.indices);
        }
    }

    if remain != Vec3::ZERO {
        log::debug!("NOTE: walking used the full iteration budget ({budget}), dropping {remain}");
    }

    WalkOutcome {
        at,
        dropped: remain,
        iterations,
        wall_hits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{PLAYER_SPEED, WALK_ITERATION_BUDGET};
    use crate::walkmesh::WalkMesh;
    use glam::{Quat, UVec3};
    use proptest::prelude::*;

    /// Surface that never lets a step make progress and has no neighbours
    struct Stuck;

    impl WalkSurface for Stuck {
        fn nearest_walk_point(&self, _: Vec3) -> WalkPoint {
            WalkPoint::new(UVec3::new(0, 1, 2), Vec3::new(0.5, 0.5, 0.0))
        }
        fn walk_in_triangle(&self, start: &WalkPoint, _: Vec3) -> (WalkPoint, f32) {
            (*start, 0.0)
        }
        fn cross_edge(&self, _: &WalkPoint) -> Option<(WalkPoint, Quat)> {
            None
        }
        fn to_world_point(&self, _: &WalkPoint) -> Vec3 {
            Vec3::ZERO
        }
        fn to_world_smooth_normal(&self, _: &WalkPoint) -> Vec3 {
            Vec3::Z
        }
        fn triangle_vertices(&self, _: &WalkPoint) -> [Vec3; 3] {
            [Vec3::ZERO, Vec3::X, Vec3::Y]
        }
    }

    #[test]
    fn test_zero_step_is_identity() {
        let mesh = WalkMesh::grid(4, 2.0).unwrap();
        let start = mesh.nearest_walk_point(Vec3::new(0.13, -0.27, 0.0));
        let out = walk(&mesh, start, Vec3::ZERO, WALK_ITERATION_BUDGET);
        assert_eq!(out.at, start);
        assert_eq!(out.iterations, 0);
        assert!(!out.truncated());
    }

    #[test]
    fn test_walk_across_triangles() {
        let mesh = WalkMesh::grid(4, 2.0).unwrap();
        let start = mesh.nearest_walk_point(Vec3::new(-0.6, 0.1, 0.0));
        let out = walk(&mesh, start, Vec3::new(1.0, 0.0, 0.0), WALK_ITERATION_BUDGET);
        assert!(!out.truncated());
        assert!(out.iterations > 1);
        let p = mesh.to_world_point(&out.at);
        assert!(p.abs_diff_eq(Vec3::new(0.4, 0.1, 0.0), 1e-4));
    }

    #[test]
    fn test_walk_slides_along_wall() {
        let mesh = WalkMesh::grid(1, 1.0).unwrap();
        let start = mesh.nearest_walk_point(Vec3::new(0.0, -0.3, 0.0));
        let out = walk(&mesh, start, Vec3::new(0.2, -0.4, 0.0), WALK_ITERATION_BUDGET);
        assert!(out.wall_hits >= 1);
        let p = mesh.to_world_point(&out.at);
        // Still on the square, moved right, never below the bottom edge
        assert!(p.y >= -0.5 - 1e-5);
        assert!(p.x > 0.0);
        assert!(out.at.is_normalized(1e-4));
    }

    /// Flat floor for y <= 0, then a 45 degree ramp rising toward +y
    fn folded() -> WalkMesh {
        let ramp = Vec3::new(0.0, -1.0, 1.0).normalize();
        let seam = (Vec3::Z + ramp).normalize();
        WalkMesh::new(
            vec![
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(-1.0, 0.0, 0.0),
                Vec3::new(1.0, 0.5, 0.5),
                Vec3::new(-1.0, 0.5, 0.5),
            ],
            vec![Vec3::Z, Vec3::Z, seam, seam, ramp, ramp],
            vec![
                UVec3::new(0, 1, 2),
                UVec3::new(0, 2, 3),
                UVec3::new(3, 2, 4),
                UVec3::new(3, 4, 5),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_seam_rotation_maps_floor_onto_ramp() {
        let mesh = folded();
        let start = mesh.nearest_walk_point(Vec3::new(-0.5, -0.1, 0.0));
        let (on_seam, time) = mesh.walk_in_triangle(&start, Vec3::new(0.0, 1.0, 0.0));
        assert!((time - 0.1).abs() < 1e-4);

        let (_, rotation) = mesh.cross_edge(&on_seam).unwrap();
        let ramp = Vec3::new(0.0, -1.0, 1.0).normalize();
        assert!((rotation * Vec3::Z).abs_diff_eq(ramp, 1e-5));
    }

    #[test]
    fn test_walk_carries_step_over_seam_unrotated() {
        let mesh = folded();
        let start = mesh.nearest_walk_point(Vec3::new(0.1, -0.5, 0.0));
        let out = walk(&mesh, start, Vec3::new(0.0, 1.0, 0.0), WALK_ITERATION_BUDGET);
        assert!(!out.truncated());
        assert_eq!(out.iterations, 3);
        assert_eq!(out.wall_hits, 0);

        // The leftover (0, 0.5, 0) is projected onto the ramp, not rotated
        // into it, so it covers 0.5 / sqrt(2) along the slope
        let p = mesh.to_world_point(&out.at);
        assert!(p.abs_diff_eq(Vec3::new(0.1, 0.25, 0.25), 1e-4));
    }

    #[test]
    fn test_budget_exhaustion_truncates() {
        let start = Stuck.nearest_walk_point(Vec3::ZERO);
        let step = Vec3::new(0.0, -1.0, 0.0);
        let a = walk(&Stuck, start, step, WALK_ITERATION_BUDGET);
        let b = walk(&Stuck, start, step, WALK_ITERATION_BUDGET);
        assert_eq!(a.iterations, WALK_ITERATION_BUDGET);
        assert_eq!(a.wall_hits, WALK_ITERATION_BUDGET);
        assert!(a.truncated());
        assert_eq!(a, b);
        assert_eq!(a.at, start);
    }

    #[test]
    fn test_local_move_zero() {
        assert_eq!(local_move(Vec2::ZERO, PLAYER_SPEED, 0.1), Vec2::ZERO);
    }

    #[test]
    fn test_world_step_follows_rotation() {
        let frame = Affine3A::from_rotation_translation(
            Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
            Vec3::new(5.0, 5.0, 5.0),
        );
        let step = world_step(&frame, Vec2::new(0.0, 1.0));
        assert!(step.abs_diff_eq(Vec3::new(-1.0, 0.0, 0.0), 1e-6));
    }

    fn axis() -> impl Strategy<Value = f32> {
        prop_oneof![Just(-1.0_f32), Just(0.0_f32), Just(1.0_f32)]
    }

    proptest! {
        #[test]
        fn prop_local_move_never_exceeds_speed(
            x in axis(),
            y in axis(),
            elapsed in 0.0f32..0.5,
        ) {
            let m = local_move(Vec2::new(x, y), PLAYER_SPEED, elapsed);
            prop_assert!(m.length() <= PLAYER_SPEED * elapsed + 1e-5);
        }

        #[test]
        fn prop_walk_keeps_barycentric_invariant(
            sx in -0.95f32..0.95,
            sy in -0.95f32..0.95,
            dx in -3.0f32..3.0,
            dy in -3.0f32..3.0,
            dz in -0.5f32..0.5,
        ) {
            let mesh = WalkMesh::grid(3, 2.0).unwrap();
            let start = mesh.nearest_walk_point(Vec3::new(sx, sy, 0.0));
            let out = walk(&mesh, start, Vec3::new(dx, dy, dz), WALK_ITERATION_BUDGET);
            prop_assert!(out.at.is_normalized(1e-4));
            prop_assert!(out.iterations <= WALK_ITERATION_BUDGET);
            let p = mesh.to_world_point(&out.at);
            prop_assert!(p.x.abs() <= 1.0 + 1e-4 && p.y.abs() <= 1.0 + 1e-4);
        }
    }
}
