//! Play mode: the interface the application loop drives
//!
//! The application owns the walk mesh and passes it in by reference; the
//! mode owns everything that changes during play.

use glam::{Affine3A, Mat4, UVec2, Vec2};

use crate::hud::ScoreOverlay;
use crate::settings::Settings;
use crate::sim::{CaptureRequest, GameState, InputState, Key, TickReport, tick};
use crate::walkmesh::WalkSurface;

/// Platform events the play mode understands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    MouseButtonDown,
    /// Relative motion in window pixels (+y is down)
    MouseMotion { xrel: f32, yrel: f32 },
}

/// Everything the presenter needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub player_to_world: Affine3A,
    pub camera_to_world: Affine3A,
    pub projection: Mat4,
    pub overlay: ScoreOverlay,
    /// Seconds until the round times out
    pub time_left: f64,
}

pub struct PlayMode<'a, S: WalkSurface + ?Sized> {
    surface: &'a S,
    settings: Settings,
    input: InputState,
    state: GameState,
}

impl<'a, S: WalkSurface + ?Sized> PlayMode<'a, S> {
    pub fn new(surface: &'a S, settings: Settings) -> Self {
        let state = GameState::new(surface, &settings);
        Self {
            surface,
            settings,
            input: InputState::new(),
            state,
        }
    }

    /// Returns true if the event was consumed
    pub fn handle_event(&mut self, event: &InputEvent, window_size: UVec2) -> bool {
        match *event {
            InputEvent::KeyDown(key) => self.input.on_key_down(key),
            InputEvent::KeyUp(key) => self.input.on_key_up(key),
            InputEvent::MouseButtonDown => self.input.on_mouse_button_down(),
            InputEvent::MouseMotion { xrel, yrel } => {
                let raw = look_delta(xrel, yrel, window_size, self.settings.mouse_sensitivity);
                let Some(delta) = self.input.on_mouse_motion(raw.x, raw.y) else {
                    return false;
                };
                let up = self.surface.to_world_smooth_normal(&self.state.player.at);
                self.state.player.look(delta, up);
                true
            }
        }
    }

    pub fn update(&mut self, elapsed: f32) -> TickReport {
        tick(
            self.surface,
            &mut self.state,
            &mut self.input,
            &self.settings,
            elapsed,
        )
    }

    pub fn draw(&mut self, drawable_size: UVec2) -> Frame {
        let size = drawable_size.max(UVec2::ONE).as_vec2();
        let player = &mut self.state.player;
        player.camera.aspect = size.x / size.y;

        Frame {
            player_to_world: player.local_to_world(),
            camera_to_world: player.camera_to_world(),
            projection: player.camera.make_projection(),
            overlay: ScoreOverlay::new(
                self.state.round.high_score,
                self.state.round.score,
                drawable_size,
            ),
            time_left: self.state.round.time_left(self.state.clock),
        }
    }

    /// Capture change for the platform to apply, if one is pending
    pub fn take_capture_request(&mut self) -> Option<CaptureRequest> {
        self.input.take_capture_request()
    }

    /// Tell the mode whether the platform actually has the mouse captured
    pub fn sync_capture(&mut self, captured: bool) {
        self.input.sync_capture(captured);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// The modes the application loop can run
pub enum Mode<'a, S: WalkSurface + ?Sized> {
    Play(PlayMode<'a, S>),
}

impl<S: WalkSurface + ?Sized> Mode<'_, S> {
    pub fn handle_event(&mut self, event: &InputEvent, window_size: UVec2) -> bool {
        match self {
            Mode::Play(play) => play.handle_event(event, window_size),
        }
    }

    pub fn update(&mut self, elapsed: f32) -> TickReport {
        match self {
            Mode::Play(play) => play.update(elapsed),
        }
    }

    pub fn draw(&mut self, drawable_size: UVec2) -> Frame {
        match self {
            Mode::Play(play) => play.draw(drawable_size),
        }
    }

    pub fn take_capture_request(&mut self) -> Option<CaptureRequest> {
        match self {
            Mode::Play(play) => play.take_capture_request(),
        }
    }
}

/// Raw pixel motion to a look delta in window heights, +y up
pub fn look_delta(xrel: f32, yrel: f32, window_size: UVec2, sensitivity: f32) -> Vec2 {
    let h = window_size.y.max(1) as f32;
    Vec2::new(xrel, -yrel) * (sensitivity / h)
}
