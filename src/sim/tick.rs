//! Per-frame simulation tick
//!
//! Strict order: input -> walking -> surface alignment -> round checks.

use super::input::InputState;
use super::locomotion::{WalkOutcome, local_move, walk, world_step};
use super::round::RoundEvent;
use super::state::GameState;
use crate::consts::SPAWN_POINT;
use crate::settings::Settings;
use crate::walkmesh::WalkSurface;

/// What a tick did, for logging and tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub walk: WalkOutcome,
    pub timeout: Option<RoundEvent>,
    pub hit: Option<RoundEvent>,
}

/// Advance the game state by `dt` seconds
pub fn tick<S: WalkSurface + ?Sized>(
    surface: &S,
    state: &mut GameState,
    input: &mut InputState,
    settings: &Settings,
    dt: f32,
) -> TickReport {
    state.clock += f64::from(dt);
    let now = state.clock;
    let player = &mut state.player;

    // Combine held buttons into a world-space step
    let local = local_move(input.move_axes(), settings.player_speed, dt);
    let step = world_step(&player.local_to_world(), local);

    let outcome = walk(surface, player.at, step, settings.walk_iteration_budget);
    player.at = outcome.at;
    player.transform.position = surface.to_world_point(&player.at);
    player.align_to_surface(surface.to_world_smooth_normal(&player.at));

    let timeout = state.round.check_timeout(now);
    if timeout.is_some() {
        player.respawn(surface, SPAWN_POINT);
    }
    let hit = state.round.check_proximity(player.transform.position, now);

    input.end_tick();

    log::trace!(
        "tick t={now:.3} pos={} score={} target={}",
        player.transform.position,
        state.round.score,
        state.round.target
    );

    TickReport {
        walk: outcome,
        timeout,
        hit,
    }
}
