//! Idle/demo mode - jumps on its own
//!
//! Works out which frames of a jump clear a cactus, then jumps when the next
//! cactus will pass under the player entirely inside that window.

use super::collision::player_hitbox;
use super::state::{GamePhase, GameState};
use crate::tuning::Tuning;

/// Extra height the feet must have over a cactus before a frame counts as clear
const CLEARANCE_MARGIN: f32 = 1.0;

/// First and last frame (1-based, counted from the jump) during which the
/// player's feet are clearly above a cactus top. `None` if a jump never clears one.
pub fn clearance_window(tuning: &Tuning) -> Option<(u32, u32)> {
    let mut dy = tuning.jump_force;
    let mut lift = 0.0f32;
    let mut first = None;
    let mut last = None;

    for frame in 1..=10_000u32 {
        dy += tuning.gravity;
        lift -= dy;
        if lift <= 0.0 {
            break;
        }
        if lift > tuning.obstacle_height + CLEARANCE_MARGIN {
            first.get_or_insert(frame);
            last = Some(frame);
        }
    }

    first.zip(last)
}

/// Should the player jump this frame?
pub fn should_jump(state: &GameState) -> bool {
    if state.phase != GamePhase::Playing || !state.player.grounded {
        return false;
    }
    let Some((clear_from, clear_to)) = clearance_window(&state.tuning) else {
        return false;
    };

    let hitbox = player_hitbox(&state.player, state.tuning.hitbox_inset);
    let speed = state.tuning.game_speed;

    state
        .obstacles
        .iter()
        .filter(|o| !o.passed && o.trailing_edge() >= hitbox.min.x)
        .any(|o| {
            // Frames until the cactus first touches and last touches the hitbox
            let enters = ((o.pos.x - hitbox.max.x) / speed).ceil();
            let leaves = ((o.trailing_edge() - hitbox.min.x) / speed).floor();
            enters >= clear_from as f32 && leaves <= clear_to as f32
        })
}
