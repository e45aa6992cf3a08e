//! Frame description
//!
//! `build_scene` turns the game state into a flat list of draw commands in
//! canvas pixels (origin top-left, y down). It has no GPU dependency, so the
//! exact layout is testable natively.

use glam::Vec2;

use super::vertex::{colors, hsl_to_rgba};
use crate::sim::{GamePhase, GameState, Obstacle};

/// Ground line thickness
pub const GROUND_LINE_WIDTH: f32 = 2.0;
/// Phrase text baseline
pub const PHRASE_Y: f32 = 50.0;
/// Phrase font size in px
pub const PHRASE_FONT_PX: f32 = 20.0;
/// Heart size at full life
pub const HEART_SIZE: f32 = 5.0;

/// One thing to draw
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Filled axis-aligned rectangle
    Rect {
        pos: Vec2,
        size: Vec2,
        color: [f32; 4],
    },
    /// Heart whose notch sits at `tip` and whose point is `2 * size` below it
    Heart {
        tip: Vec2,
        size: f32,
        color: [f32; 4],
    },
    /// Centered text; drawn by the page, not the GPU
    Text {
        text: String,
        center: Vec2,
        font_px: f32,
        color: [f32; 4],
    },
}

/// Everything in one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub clear: [f32; 4],
    pub commands: Vec<DrawCmd>,
}

impl Scene {
    /// The text command, if any
    pub fn text(&self) -> Option<&str> {
        self.commands.iter().find_map(|cmd| match cmd {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

fn rect(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> DrawCmd {
    DrawCmd::Rect {
        pos: Vec2::new(x, y),
        size: Vec2::new(w, h),
        color,
    }
}

/// Stalk and two arms
fn cactus(obs: &Obstacle, commands: &mut Vec<DrawCmd>) {
    let Vec2 { x, y } = obs.pos;
    commands.push(rect(x + 5.0, y, 15.0, obs.size.y, colors::INK));
    commands.push(rect(x, y + 10.0, 5.0, 10.0, colors::INK));
    commands.push(rect(x + 20.0, y + 5.0, 5.0, 10.0, colors::INK));
}

/// Build the draw list for the current state
pub fn build_scene(state: &GameState) -> Scene {
    let mut commands = Vec::with_capacity(8 + state.obstacles.len() * 3 + state.particles.len());
    let tuning = &state.tuning;
    let width = state.viewport.x;

    // Ground, centered on the line the player stands on
    let ground = tuning.ground_y + tuning.player_height;
    commands.push(rect(
        0.0,
        ground - GROUND_LINE_WIDTH / 2.0,
        width,
        GROUND_LINE_WIDTH,
        colors::INK,
    ));

    // Dino
    let player = &state.player;
    commands.push(DrawCmd::Rect {
        pos: player.pos,
        size: player.size,
        color: colors::INK,
    });
    commands.push(rect(
        player.pos.x + 25.0,
        player.pos.y + 5.0,
        5.0,
        5.0,
        colors::EYE,
    ));

    for obs in &state.obstacles {
        cactus(obs, &mut commands);
    }

    if !state.phrase.revealed().is_empty() {
        commands.push(DrawCmd::Text {
            text: state.phrase.revealed_text(),
            center: Vec2::new(width / 2.0, PHRASE_Y),
            font_px: PHRASE_FONT_PX,
            color: colors::PHRASE,
        });
    }

    if state.phase == GamePhase::Success {
        for p in &state.particles {
            commands.push(DrawCmd::Heart {
                tip: p.pos,
                size: HEART_SIZE * p.life,
                color: hsl_to_rgba(p.hue, 1.0, 0.7, 1.0),
            });
        }
    }

    Scene {
        clear: colors::BACKGROUND,
        commands,
    }
}
