//! Player physics
//!
//! Per-frame Euler integration: gravity into velocity, velocity into position,
//! then clamp to the ground line and the top of the canvas.

use glam::Vec2;

use crate::tuning::Tuning;

/// The runner
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner; x never changes
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (px/frame, negative = up)
    pub dy: f32,
    pub grounded: bool,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, tuning.ground_y),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            dy: 0.0,
            grounded: true,
        }
    }

    /// Put the player back on the ground, at rest
    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    /// Start a jump. Only possible from the ground.
    pub fn jump(&mut self, jump_force: f32) -> bool {
        if !self.grounded {
            return false;
        }
        self.dy = jump_force;
        self.grounded = false;
        true
    }

    /// Advance one frame
    pub fn update(&mut self, gravity: f32, ground_y: f32) {
        self.dy += gravity;
        self.pos.y += self.dy;

        if self.pos.y > ground_y {
            self.pos.y = ground_y;
            self.dy = 0.0;
            self.grounded = true;
        }

        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.dy = 0.0;
        }
    }

    /// Right edge
    #[inline]
    pub fn leading_edge(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn player() -> Player {
        Player::new(&Tuning::default())
    }

    #[test]
    fn test_grounded_player_stays_put() {
        let t = Tuning::default();
        let mut p = player();
        for _ in 0..10 {
            p.update(t.gravity, t.ground_y);
        }
        assert_eq!(p.pos.y, t.ground_y);
        assert_eq!(p.dy, 0.0);
        assert!(p.grounded);
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let t = Tuning::default();
        let mut p = player();
        assert!(p.jump(t.jump_force));
        assert!(!p.grounded);

        p.update(t.gravity, t.ground_y);
        assert!((p.dy - (-11.2)).abs() < 1e-5);
        assert!((p.pos.y - (220.0 - 11.2)).abs() < 1e-4);

        let mut peak = p.pos.y;
        let mut frames = 1;
        while !p.grounded {
            p.update(t.gravity, t.ground_y);
            peak = peak.min(p.pos.y);
            frames += 1;
            assert!(frames < 100, "never landed");
        }
        assert_eq!(p.pos.y, t.ground_y);
        assert_eq!(p.dy, 0.0);
        // Roughly 12²/(2*0.8) minus discretisation
        assert!(peak < 140.0 && peak > 120.0, "peak was {peak}");
    }

    #[test]
    fn test_no_double_jump() {
        let t = Tuning::default();
        let mut p = player();
        assert!(p.jump(t.jump_force));
        p.update(t.gravity, t.ground_y);
        let dy = p.dy;
        assert!(!p.jump(t.jump_force));
        assert_eq!(p.dy, dy);
    }

    #[test]
    fn test_ceiling_clamp() {
        let t = Tuning::default();
        let mut p = player();
        p.pos.y = 5.0;
        p.dy = -30.0;
        p.grounded = false;
        p.update(t.gravity, t.ground_y);
        assert_eq!(p.pos.y, 0.0);
        assert_eq!(p.dy, 0.0);
    }

    proptest! {
        #[test]
        fn prop_position_stays_in_bounds(
            start_y in 0.0f32..220.0,
            start_dy in -60.0f32..60.0,
            frames in 1usize..200,
        ) {
            let t = Tuning::default();
            let mut p = player();
            p.pos.y = start_y;
            p.dy = start_dy;
            p.grounded = false;
            for _ in 0..frames {
                p.update(t.gravity, t.ground_y);
                prop_assert!(p.pos.y >= 0.0 && p.pos.y <= t.ground_y);
                if p.pos.y == t.ground_y && p.grounded {
                    prop_assert_eq!(p.dy, 0.0);
                }
            }
        }
    }
}
