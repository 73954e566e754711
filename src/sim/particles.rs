//! Decorative burst particles

use glam::Vec2;
use rand::Rng;

/// Life lost per frame-unit
pub const PARTICLE_DECAY: f32 = 0.02;

/// Straight RGBA colour (alpha 0-1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS `rgba(...)` form
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.a)
    }
}

/// Gold used by collectible bursts
pub const GOLD: Rgba = Rgba::new(251, 191, 36, 1.0);

#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: Rgba,
    /// 1.0 at birth, removed at 0
    pub life: f32,
}

/// Emit `count` particles at `center`
pub fn burst<R: Rng>(rng: &mut R, particles: &mut Vec<Particle>, center: Vec2, count: usize) {
    particles.reserve(count);
    for _ in 0..count {
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * 4.0,
            (rng.random::<f32>() - 0.5) * 4.0,
        );
        particles.push(Particle {
            pos: center,
            vel,
            size: rng.random::<f32>() * 3.0 + 2.0,
            color: Rgba { a: rng.random::<f32>(), ..GOLD },
            life: 1.0,
        });
    }
}

/// Move and age particles, dropping the dead ones
pub fn update(particles: &mut Vec<Particle>, dt: f32) {
    for p in particles.iter_mut() {
        p.pos += p.vel * dt;
        p.life -= PARTICLE_DECAY * dt;
    }
    particles.retain(|p| p.life > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_shape() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut particles = Vec::new();
        burst(&mut rng, &mut particles, Vec2::new(10.0, 20.0), 20);
        assert_eq!(particles.len(), 20);
        for p in &particles {
            assert_eq!(p.pos, Vec2::new(10.0, 20.0));
            assert!(p.vel.x.abs() <= 2.0 && p.vel.y.abs() <= 2.0);
            assert!((2.0..5.0).contains(&p.size));
            assert_eq!(p.life, 1.0);
        }
    }

    #[test]
    fn test_particles_expire() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut particles = Vec::new();
        burst(&mut rng, &mut particles, Vec2::ZERO, 5);
        update(&mut particles, 25.0);
        assert_eq!(particles.len(), 5);
        update(&mut particles, 30.0);
        assert!(particles.is_empty());
    }

    #[test]
    fn test_css() {
        assert_eq!(GOLD.css(), "rgba(251, 191, 36, 1.000)");
    }
}
