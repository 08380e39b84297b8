//! Walkabout entry point
//!
//! Runs a headless, scripted session on a flat demo walk mesh and logs the
//! score overlay. A windowed host drives `Mode` the same way: forward
//! events, call `update` once per frame, then `draw`.

use glam::UVec2;

use walkabout::mode::InputEvent;
use walkabout::sim::{CaptureRequest, Key};
use walkabout::{Mode, PlayMode, Settings, WalkMesh};

/// Simulated frame rate for the scripted session
const FRAME_DT: f32 = 1.0 / 60.0;
/// Session length in frames (10 seconds)
const SESSION_FRAMES: u32 = 600;
const WINDOW: UVec2 = UVec2::new(1280, 720);

/// Input to send at a given frame of the scripted session
fn scripted_events(frame: u32) -> Vec<InputEvent> {
    let mut events = Vec::new();
    if frame == 0 {
        events.push(InputEvent::MouseButtonDown);
    }
    // Alternate forward and strafing every second
    match frame % 120 {
        0 => {
            events.push(InputEvent::KeyUp(Key::Right));
            events.push(InputEvent::KeyDown(Key::Up));
        }
        60 => {
            events.push(InputEvent::KeyUp(Key::Up));
            events.push(InputEvent::KeyDown(Key::Right));
        }
        _ => {}
    }
    // Slow turn to the left
    if frame % 4 == 0 {
        events.push(InputEvent::MouseMotion {
            xrel: -6.0,
            yrel: 0.0,
        });
    }
    events
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Walkabout (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let mesh = match WalkMesh::grid(9, 2.0) {
        Ok(mesh) => mesh,
        Err(e) => {
            log::error!("Failed to build walk mesh: {e}");
            std::process::exit(1);
        }
    };

    let play = PlayMode::new(&mesh, settings);
    log::info!(
        "Round seed {}, speed {}",
        play.state().round.seed,
        play.settings().player_speed
    );
    let mut mode = Mode::Play(play);

    for frame in 0..SESSION_FRAMES {
        for event in scripted_events(frame) {
            mode.handle_event(&event, WINDOW);
        }

        // Headless "platform": apply capture requests immediately
        if let Some(request) = mode.take_capture_request() {
            let Mode::Play(play) = &mut mode;
            play.sync_capture(request == CaptureRequest::Capture);
        }

        let report = mode.update(FRAME_DT);
        for event in report.timeout.iter().chain(report.hit.iter()) {
            log::info!("frame {frame}: {event:?}");
        }
        let frame_out = mode.draw(WINDOW);

        if frame % 60 == 59 {
            let pos = frame_out.player_to_world.translation;
            log::info!(
                "t={:.1}s pos=({:.2}, {:.2}) {} ({:.1}s left)",
                (frame + 1) as f32 * FRAME_DT,
                pos.x,
                pos.y,
                frame_out.overlay.text,
                frame_out.time_left
            );
        }
    }

    let Mode::Play(play) = &mode;
    let round = &play.state().round;
    log::info!(
        "Session over: high score {}, score {}",
        round.high_score,
        round.score
    );
}
