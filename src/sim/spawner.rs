//! Obstacle spawner
//!
//! One cactus per phrase word. The gate is re-rolled on every check, so the
//! effective spacing leans toward the lower bound.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GameState, Obstacle};

/// Spawn the next obstacle if the gate allows it. Returns true on spawn.
pub fn spawn_obstacle(state: &mut GameState, now_ms: f64) -> bool {
    if state.phrase.all_spawned() {
        return false;
    }

    let min = state.tuning.spawn_interval_min;
    let max = state.tuning.spawn_interval_max;
    let gate = min + state.rng.random::<f64>() * (max - min);
    let elapsed = now_ms - state.last_spawn_ms;
    if elapsed <= gate {
        return false;
    }

    let Some(word) = state.phrase.next_word() else {
        return false;
    };
    let id = state.next_entity_id();
    let obstacle = Obstacle {
        id,
        pos: Vec2::new(state.viewport.x, state.tuning.ground_y),
        size: Vec2::new(state.tuning.obstacle_width, state.tuning.obstacle_height),
        passed: false,
        word: word.clone(),
    };
    log::debug!("Spawned obstacle {} carrying {:?} after {:.0} ms", id, word, elapsed);
    state.obstacles.push(obstacle);
    state.last_spawn_ms = now_ms;
    state.emit(GameEvent::ObstacleSpawned { id, word });
    true
}
