//! Collision detection
//!
//! Axis-aligned boxes in screen space (y grows downward). The player's box is
//! pulled in horizontally so grazing a cactus edge is forgiven.

use glam::Vec2;

use super::physics::Player;
use super::state::Obstacle;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos, pos + size)
    }

    /// Overlap test; touching edges count as a hit
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

/// Player hitbox with `inset` trimmed from the left and right edges
pub fn player_hitbox(player: &Player, inset: f32) -> Aabb {
    let bounds = Aabb::from_pos_size(player.pos, player.size);
    Aabb::new(
        Vec2::new(bounds.min.x + inset, bounds.min.y),
        Vec2::new(bounds.max.x - inset, bounds.max.y),
    )
}

pub fn obstacle_hitbox(obstacle: &Obstacle) -> Aabb {
    Aabb::from_pos_size(obstacle.pos, obstacle.size)
}

/// Does the player hit this obstacle?
pub fn player_hits_obstacle(player: &Player, obstacle: &Obstacle, inset: f32) -> bool {
    player_hitbox(player, inset).overlaps(&obstacle_hitbox(obstacle))
}
