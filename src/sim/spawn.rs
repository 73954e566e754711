//! Procedural obstacle and collectible generation
//!
//! Tier thresholds are design parameters: collectibles split 20/40/40 into
//! low (no jump), mid (jump) and high (full jump); obstacles split in thirds.

use glam::Vec2;
use rand::Rng;

use super::actor::ground_y;
use super::state::{GameState, StoryPhase};
use crate::assets::ImageId;
use crate::consts::CANVAS_WIDTH;

/// Height band of a spawned entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Low,
    Mid,
    High,
}

impl Tier {
    /// Collectible tier from a uniform roll in [0, 1)
    pub fn collectible(roll: f64) -> Self {
        if roll < 0.20 {
            Tier::Low
        } else if roll < 0.60 {
            Tier::Mid
        } else {
            Tier::High
        }
    }

    /// Obstacle tier from a uniform roll in [0, 1)
    pub fn obstacle(roll: f64) -> Self {
        if roll < 1.0 / 3.0 {
            Tier::Low
        } else if roll < 2.0 / 3.0 {
            Tier::Mid
        } else {
            Tier::High
        }
    }

    /// Height above the ground a collectible floats at
    pub fn fly_height(&self) -> f32 {
        match self {
            Tier::Low => 50.0,
            Tier::Mid => 90.0,
            Tier::High => 140.0,
        }
    }

    /// Obstacle width/height
    pub fn obstacle_size(&self) -> Vec2 {
        match self {
            Tier::Low => Vec2::new(40.0, 25.0),
            Tier::Mid => Vec2::new(30.0, 45.0),
            Tier::High => Vec2::new(25.0, 65.0),
        }
    }

    /// Obstacle sprite for the given story phase
    pub fn obstacle_image(&self, phase: StoryPhase) -> ImageId {
        let second_set = phase == StoryPhase::Solo2;
        match (self, second_set) {
            (Tier::Low, false) => ImageId::ObLow,
            (Tier::Mid, false) => ImageId::ObMid,
            (Tier::High, false) => ImageId::ObHigh,
            (Tier::Low, true) => ImageId::ObLow2,
            (Tier::Mid, true) => ImageId::ObMid2,
            (Tier::High, true) => ImageId::ObHigh2,
        }
    }
}

pub const COLLECTIBLE_SIZE: Vec2 = Vec2::new(30.0, 40.0);

#[derive(Debug, Clone)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    pub image: ImageId,
}

#[derive(Debug, Clone)]
pub struct Collectible {
    pub pos: Vec2,
    pub size: Vec2,
    pub image: ImageId,
    /// Resting y the float animation oscillates around
    pub base_y: f32,
    pub collected: bool,
    /// Phase of the sinusoidal bob (radians)
    pub float_offset: f32,
}

impl Obstacle {
    pub fn new(tier: Tier, phase: StoryPhase) -> Self {
        let size = tier.obstacle_size();
        Self {
            pos: Vec2::new(CANVAS_WIDTH, ground_y() - size.y),
            size,
            image: tier.obstacle_image(phase),
        }
    }
}

impl Collectible {
    pub fn new(tier: Tier, float_offset: f32) -> Self {
        let base_y = ground_y() - tier.fly_height();
        Self {
            pos: Vec2::new(CANVAS_WIDTH, base_y),
            size: COLLECTIBLE_SIZE,
            image: ImageId::Page,
            base_y,
            collected: false,
            float_offset,
        }
    }
}

/// Frames until the next spawn: shrinks with speed, floor keeps spacing playable
pub fn spawn_gap<R: Rng>(rng: &mut R, speed: f32) -> f32 {
    let variance = (60.0 - 2.0 * speed).max(20.0);
    300.0 / speed + rng.random::<f32>() * variance
}

/// Emit an entity if the frame counter has reached the spawn threshold
pub fn spawn_due(state: &mut GameState) {
    if state.frames < state.next_spawn_frame {
        return;
    }

    if state.spawning_suppressed() {
        state.next_spawn_frame = state.frames + state.tuning.suppressed_recheck;
        log::trace!("spawn suppressed at frame {:.1}", state.frames);
        return;
    }

    if state.rng.random_bool(state.tuning.collectible_chance) {
        let tier = Tier::collectible(state.rng.random::<f64>());
        let offset = state.rng.random::<f32>() * std::f32::consts::TAU;
        state.collectibles.push(Collectible::new(tier, offset));
    } else {
        let tier = Tier::obstacle(state.rng.random::<f64>());
        state.obstacles.push(Obstacle::new(tier, state.phase));
    }

    let gap = spawn_gap(&mut state.rng, state.speed);
    state.next_spawn_frame = state.frames + gap;
}
