//! Walkabout - first-person walkmesh locomotion with a timed target hunt
//!
//! Core modules:
//! - `sim`: Per-frame gameplay (input, walking, orientation, round scoring)
//! - `walkmesh`: Triangulated walking surface and its queries
//! - `scene`: Minimal player/camera transforms consumed by a presenter
//! - `hud`: Score overlay description
//! - `mode`: The interface the application loop drives
//! - `settings`: Data-driven tunables

pub mod hud;
pub mod mode;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod walkmesh;

pub use mode::{Frame, Mode, PlayMode};
pub use settings::{Settings, SettingsError};
pub use walkmesh::{WalkMesh, WalkMeshError, WalkPoint, WalkSurface};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Walking speed (world units per second)
    pub const PLAYER_SPEED: f32 = 3.0;
    /// Upper bound on triangle steps per tick, guards against degenerate topology
    pub const WALK_ITERATION_BUDGET: u32 = 10;
    /// Wall response when the remaining step points out through the wall
    pub const WALL_BOUNCE: f32 = 1.25;
    /// Wall response when the remaining step already runs along or away from the wall
    pub const WALL_NUDGE: f32 = 0.01;

    /// Round length in seconds
    pub const ROUND_DURATION: f64 = 3.0;
    /// Per-axis distance at which the player collects the target
    pub const TARGET_TOLERANCE: f32 = 0.07;
    /// Target coordinates are drawn from [-TARGET_RANGE, TARGET_RANGE]
    pub const TARGET_RANGE: f32 = 0.9;
    /// Score before the first hit or timeout
    pub const SCORE_SENTINEL: i32 = -1;

    /// Player spawn (and timeout reset) point
    pub const SPAWN_POINT: Vec3 = Vec3::new(0.0, 0.0, 0.5);

    /// Camera pitch limits (radians). Zero pitch looks straight down.
    pub const PITCH_MIN: f32 = 0.05 * std::f32::consts::PI;
    pub const PITCH_MAX: f32 = 0.95 * std::f32::consts::PI;
    /// Initial pitch: camera -z turned to the player's +y
    pub const PITCH_START: f32 = std::f32::consts::FRAC_PI_2;

    /// Camera vertical field of view (radians, 60 degrees)
    pub const CAMERA_FOVY: f32 = std::f32::consts::FRAC_PI_3;
    pub const CAMERA_NEAR: f32 = 0.01;
    /// Eye height above the player's feet
    pub const CAMERA_EYE_OFFSET: Vec3 = Vec3::new(0.0, 0.0, 0.5);
}

/// Clamp a camera pitch to the allowed look range
#[inline]
pub fn clamp_pitch(pitch: f32) -> f32 {
    pitch.clamp(consts::PITCH_MIN, consts::PITCH_MAX)
}

/// Per-axis closeness test on the horizontal (x, y) plane
#[inline]
pub fn within_xy(a: Vec3, b: Vec3, tolerance: f32) -> bool {
    (a.x - b.x).abs() <= tolerance && (a.y - b.y).abs() <= tolerance
}
