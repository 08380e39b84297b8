//! Round transitions
//!
//! One implicit "playing" state with two transitions, checked once per
//! tick: the round timing out, and the player reaching the target.

use glam::Vec3;

use super::state::RoundState;
use crate::within_xy;

/// What happened to the round this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEvent {
    /// Timer ran out; `banked` became the high score
    TimedOut { banked: i32 },
    /// Player reached the target; `score` is the new score
    TargetHit { score: i32 },
}

impl RoundState {
    /// Bank the score and start a new round if the timer ran out.
    ///
    /// The caller is responsible for moving the player back to spawn.
    pub fn check_timeout(&mut self, now: f64) -> Option<RoundEvent> {
        if now < self.last_reset + self.duration {
            return None;
        }

        let banked = self.score;
        self.high_score = banked;
        self.score = 0;
        self.target = self.random_target();
        self.last_reset = now;
        log::info!("Round over: banked {banked}, new target at {}", self.target);
        Some(RoundEvent::TimedOut { banked })
    }

    /// Score and move the target if the player is within tolerance of it.
    /// A hit also restarts the round timer.
    pub fn check_proximity(&mut self, player: Vec3, now: f64) -> Option<RoundEvent> {
        if !within_xy(player, self.target, self.tolerance) {
            return None;
        }

        self.score += 1;
        self.target = self.random_target();
        self.last_reset = now;
        log::info!("Target hit: score {}, next target at {}", self.score, self.target);
        Some(RoundEvent::TargetHit { score: self.score })
    }
}
