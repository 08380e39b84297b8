//! Score overlay
//!
//! Describes the one-line score text drawn over the scene: a dark copy and
//! a light copy nudged by one device pixel, which reads as an outline. The
//! presenter owns the actual line/glyph rendering.

use glam::{Mat4, UVec2, Vec3};

/// Glyph height in overlay units (screen height is 2)
pub const GLYPH_HEIGHT: f32 = 0.09;

pub const SHADOW_COLOR: [u8; 4] = [0x00, 0x00, 0x00, 0xff];
pub const TEXT_COLOR: [u8; 4] = [0xff, 0xff, 0xff, 0xff];

/// Where and how to draw one copy of the text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextDraw {
    /// Baseline start
    pub anchor: Vec3,
    /// Glyph x extent
    pub x_axis: Vec3,
    /// Glyph y extent
    pub y_axis: Vec3,
    pub color: [u8; 4],
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreOverlay {
    pub text: String,
    /// Overlay space to clip space (undoes the aspect stretch)
    pub clip_from_overlay: Mat4,
    pub shadow: TextDraw,
    pub face: TextDraw,
}

pub fn score_text(high_score: i32, score: i32) -> String {
    format!("High Score: {high_score} Your Score: {score}")
}

impl ScoreOverlay {
    pub fn new(high_score: i32, score: i32, drawable_size: UVec2) -> Self {
        let size = drawable_size.max(UVec2::ONE).as_vec2();
        let aspect = size.x / size.y;
        let h = GLYPH_HEIGHT;

        let anchor = Vec3::new(-aspect + 0.1 * h, -1.0 + 0.1 * h, 0.0);
        // One pixel in overlay units
        let ofs = 2.0 / size.y;

        let draw = |anchor, color| TextDraw {
            anchor,
            x_axis: Vec3::new(h, 0.0, 0.0),
            y_axis: Vec3::new(0.0, h, 0.0),
            color,
        };

        Self {
            text: score_text(high_score, score),
            clip_from_overlay: Mat4::from_scale(Vec3::new(1.0 / aspect, 1.0, 1.0)),
            shadow: draw(anchor, SHADOW_COLOR),
            face: draw(anchor + Vec3::new(ofs, ofs, 0.0), TEXT_COLOR),
        }
    }
}
