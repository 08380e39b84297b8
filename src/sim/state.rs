//! Play state and core gameplay types
//!
//! The walk point is the source of truth for where the player is; the
//! player transform mirrors it after every tick.

use glam::{Affine3A, Quat, Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::orientation::{align_up, apply_pitch, apply_yaw, pitch_rotation};
use crate::consts::*;
use crate::scene::{Camera, Transform};
use crate::settings::Settings;
use crate::walkmesh::{WalkPoint, WalkSurface};

/// The walking player
#[derive(Debug, Clone)]
pub struct Player {
    /// Position on the walk mesh
    pub at: WalkPoint,
    /// At the player's feet; yawed by horizontal mouse motion
    pub transform: Transform,
    /// At the player's head, parented to `transform`; pitched by vertical motion
    pub camera: Camera,
    /// Camera pitch (radians), always within [PITCH_MIN, PITCH_MAX]
    pub pitch: f32,
}

impl Player {
    /// Place a new player on the surface point nearest to `spawn`
    pub fn spawn<S: WalkSurface + ?Sized>(surface: &S, spawn: Vec3, fovy: f32) -> Self {
        let pitch = PITCH_START;
        let camera = Camera {
            transform: Transform::new(CAMERA_EYE_OFFSET, pitch_rotation(pitch)),
            fovy,
            aspect: 1.0,
            near: CAMERA_NEAR,
        };
        Self {
            at: surface.nearest_walk_point(spawn),
            transform: Transform::new(spawn, Quat::IDENTITY),
            camera,
            pitch,
        }
    }

    /// Move back to `spawn`, keeping the current facing
    pub fn respawn<S: WalkSurface + ?Sized>(&mut self, surface: &S, spawn: Vec3) {
        self.at = surface.nearest_walk_point(spawn);
        self.transform.position = spawn;
    }

    /// Apply a look delta (fractions of the window height, +y looks up)
    pub fn look(&mut self, delta: Vec2, up: Vec3) {
        let fovy = self.camera.fovy;
        self.transform.rotation = apply_yaw(self.transform.rotation, up, delta.x, fovy);
        self.pitch = apply_pitch(self.pitch, delta.y, fovy);
        self.camera.transform.rotation = pitch_rotation(self.pitch);
    }

    /// Re-align the player's up axis with the surface normal under it
    pub fn align_to_surface(&mut self, up: Vec3) {
        self.transform.rotation = align_up(self.transform.rotation, up);
    }

    pub fn local_to_world(&self) -> Affine3A {
        self.transform.make_local_to_parent()
    }

    pub fn camera_to_world(&self) -> Affine3A {
        self.local_to_world() * self.camera.transform.make_local_to_parent()
    }
}

/// Round scoring state: target, scores and the round timer
#[derive(Debug, Clone)]
pub struct RoundState {
    /// Target position (z is always 0)
    pub target: Vec3,
    /// Hits this round; starts at SCORE_SENTINEL
    pub score: i32,
    /// Score banked at the last timeout
    pub high_score: i32,
    /// Clock time (seconds) the round timer last restarted
    pub last_reset: f64,
    pub duration: f64,
    pub tolerance: f32,
    pub range: f32,
    /// Seed the generator was created from
    pub seed: u64,
    rng: Pcg32,
}

impl RoundState {
    /// Fresh round at clock time `now` with a random target
    pub fn new(settings: &Settings, now: f64) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        let mut round = Self {
            target: Vec3::ZERO,
            score: SCORE_SENTINEL,
            high_score: 0,
            last_reset: now,
            duration: settings.round_duration,
            tolerance: settings.target_tolerance,
            range: settings.target_range,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        };
        round.target = round.random_target();
        log::info!("Round started (seed {seed}), target at {}", round.target);
        round
    }

    /// Uniform point in [-range, range]^2 on the z = 0 plane
    pub fn random_target(&mut self) -> Vec3 {
        let r = self.range;
        Vec3::new(
            self.rng.random_range(-r..=r),
            self.rng.random_range(-r..=r),
            0.0,
        )
    }

    /// Seconds left before the round times out
    pub fn time_left(&self, now: f64) -> f64 {
        (self.last_reset + self.duration - now).max(0.0)
    }
}

/// Everything the play mode mutates each tick
#[derive(Debug, Clone)]
pub struct GameState {
    pub player: Player,
    pub round: RoundState,
    /// Simulated time in seconds (sum of tick elapsed values)
    pub clock: f64,
}

impl GameState {
    pub fn new<S: WalkSurface + ?Sized>(surface: &S, settings: &Settings) -> Self {
        let clock = 0.0;
        Self {
            player: Player::spawn(surface, SPAWN_POINT, settings.camera_fovy),
            round: RoundState::new(settings, clock),
            clock,
        }
    }
}
