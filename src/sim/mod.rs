//! Per-frame gameplay simulation
//!
//! All gameplay logic lives here:
//! - Single-threaded, one `tick` per rendered frame
//! - Seeded RNG only (one generator per round state)
//! - Bounded work per tick (walking is capped by an iteration budget)
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod locomotion;
pub mod orientation;
pub mod round;
pub mod state;
pub mod tick;

pub use collision::{WallFrame, wall_response};
pub use input::{Button, CaptureRequest, InputState, Key};
pub use locomotion::{WalkOutcome, local_move, walk, world_step};
pub use round::RoundEvent;
pub use state::{GameState, Player, RoundState};
pub use tick::{TickReport, tick};
