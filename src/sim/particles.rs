//! Celebration particles
//!
//! Purely decorative. Bursts fling pink hearts upward; gravity and decay do the rest.

use glam::Vec2;
use rand::Rng;

use crate::consts::{BURST_SIZE, PARTICLE_DECAY, PARTICLE_GRAVITY};

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32, // 0-1, decreases over time
    /// Hue in degrees, within the pink band 330-360
    pub hue: f32,
}

/// Add one burst of `BURST_SIZE` particles at `center`
pub fn burst<R: Rng>(particles: &mut Vec<Particle>, rng: &mut R, center: Vec2) {
    particles.reserve(BURST_SIZE);
    for _ in 0..BURST_SIZE {
        let vx = (rng.random::<f32>() - 0.5) * 10.0;
        let vy = (rng.random::<f32>() - 0.5) * 10.0 - 5.0;
        particles.push(Particle {
            pos: center,
            vel: Vec2::new(vx, vy),
            life: 1.0,
            hue: 330.0 + rng.random::<f32>() * 30.0,
        });
    }
}

/// Advance every particle one frame and drop the dead ones
pub fn update(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.vel.y += PARTICLE_GRAVITY;
        p.life -= PARTICLE_DECAY;
    }
    particles.retain(|p| p.life > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_velocity_bounds() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut particles = Vec::new();
        burst(&mut particles, &mut rng, Vec2::new(400.0, 150.0));
        assert_eq!(particles.len(), BURST_SIZE);
        for p in &particles {
            assert_eq!(p.pos, Vec2::new(400.0, 150.0));
            assert_eq!(p.life, 1.0);
            assert!(p.vel.x >= -5.0 && p.vel.x < 5.0);
            assert!(p.vel.y >= -10.0 && p.vel.y < 0.0, "biased upward");
            assert!(p.hue >= 330.0 && p.hue < 360.0);
        }
    }

    #[test]
    fn test_update_integrates_then_applies_gravity() {
        let mut particles = vec![Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(2.0, -4.0),
            life: 1.0,
            hue: 340.0,
        }];
        update(&mut particles);
        let p = &particles[0];
        assert_eq!(p.pos, Vec2::new(2.0, -4.0));
        assert!((p.vel.y - (-3.8)).abs() < 1e-6);
        assert!((p.life - 0.98).abs() < 1e-6);
    }

    #[test]
    fn test_population_decays_to_zero() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut particles = Vec::new();
        burst(&mut particles, &mut rng, Vec2::ZERO);
        let mut last = particles.len();
        let mut frames = 0;
        while !particles.is_empty() {
            update(&mut particles);
            assert!(particles.len() <= last);
            last = particles.len();
            frames += 1;
            assert!(frames <= 60, "particles outlived their life");
        }
        assert!(frames >= 49);
    }
}
