//! Mouse look and surface alignment
//!
//! Yaw turns the player about the local surface up-vector, pitch only tilts
//! the camera. After each move the player's up axis is re-aligned to the
//! smoothed surface normal so it follows slopes without collecting roll.

use glam::{Quat, Vec3};

use crate::clamp_pitch;

/// Turn `rotation` by `-delta_x * fovy` about `up`
pub fn apply_yaw(rotation: Quat, up: Vec3, delta_x: f32, fovy: f32) -> Quat {
    let axis = up.normalize_or(Vec3::Z);
    Quat::from_axis_angle(axis, -delta_x * fovy) * rotation
}

/// New clamped camera pitch after a vertical look delta
pub fn apply_pitch(pitch: f32, delta_y: f32, fovy: f32) -> f32 {
    clamp_pitch(pitch + delta_y * fovy)
}

/// Camera rotation for a pitch angle, relative to the player
#[inline]
pub fn pitch_rotation(pitch: f32) -> Quat {
    Quat::from_rotation_x(pitch)
}

/// Rotate `rotation` so its local +z lines up with `surface_up`
pub fn align_up(rotation: Quat, surface_up: Vec3) -> Quat {
    let current_up = (rotation * Vec3::Z).normalize();
    let adjust = Quat::from_rotation_arc(current_up, surface_up.normalize_or(current_up));
    (adjust * rotation).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CAMERA_FOVY, PITCH_MAX, PITCH_MIN, PITCH_START};
    use proptest::prelude::*;

    #[test]
    fn test_yaw_about_up() {
        let r = apply_yaw(Quat::IDENTITY, Vec3::Z, -0.5, std::f32::consts::PI);
        // Quarter turn left: forward (+y) becomes -x
        let fwd = r * Vec3::Y;
        assert!(fwd.abs_diff_eq(Vec3::new(-1.0, 0.0, 0.0), 1e-5));
        // Up is unchanged by yaw about up
        assert!((r * Vec3::Z).abs_diff_eq(Vec3::Z, 1e-5));
    }

    #[test]
    fn test_pitch_clamps() {
        assert_eq!(apply_pitch(PITCH_START, 100.0, CAMERA_FOVY), PITCH_MAX);
        assert_eq!(apply_pitch(PITCH_START, -100.0, CAMERA_FOVY), PITCH_MIN);
        let p = apply_pitch(PITCH_START, 0.1, CAMERA_FOVY);
        assert!((p - (PITCH_START + 0.1 * CAMERA_FOVY)).abs() < 1e-6);
    }

    #[test]
    fn test_align_up_to_slope() {
        let slope = Vec3::new(0.0, -1.0, 1.0).normalize();
        let r = align_up(Quat::IDENTITY, slope);
        assert!((r * Vec3::Z).abs_diff_eq(slope, 1e-5));
        assert!((r.length() - 1.0).abs() < 1e-5);
        // Already aligned is a no-op
        let again = align_up(r, slope);
        assert!(again.abs_diff_eq(r, 1e-5));
    }

    proptest! {
        #[test]
        fn prop_pitch_stays_in_range(deltas in prop::collection::vec(-1e4f32..1e4, 1..50)) {
            let mut pitch = PITCH_START;
            for d in deltas {
                pitch = apply_pitch(pitch, d, CAMERA_FOVY);
                prop_assert!((PITCH_MIN..=PITCH_MAX).contains(&pitch));
            }
        }
    }
}
