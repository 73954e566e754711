//! Player characters
//!
//! Both characters share the same physics; they differ in size and sprite.

use glam::Vec2;

use crate::assets::ImageId;
use crate::consts::*;

/// Which character an actor is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorKind {
    Pudding,
    Noodle,
}

impl ActorKind {
    /// Collision/draw size
    pub fn size(&self) -> Vec2 {
        match self {
            ActorKind::Pudding => Vec2::new(80.0, 40.0),
            ActorKind::Noodle => Vec2::new(70.0, 45.0),
        }
    }

    /// Size of one frame in the horizontal run strip
    pub fn sprite_frame(&self) -> Vec2 {
        match self {
            ActorKind::Pudding => Vec2::new(160.0, 80.0),
            ActorKind::Noodle => Vec2::new(140.0, 90.0),
        }
    }

    pub fn image(&self) -> ImageId {
        match self {
            ActorKind::Pudding => ImageId::PuddingRun,
            ActorKind::Noodle => ImageId::NoodleRun,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActorKind::Pudding => "Pudding",
            ActorKind::Noodle => "Noodle",
        }
    }
}

/// Y coordinate of the ground line
#[inline]
pub fn ground_y() -> f32 {
    CANVAS_HEIGHT - GROUND_HEIGHT
}

/// A running, jumping character
#[derive(Debug, Clone)]
pub struct Actor {
    pub kind: ActorKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Vertical velocity (negative is up)
    pub dy: f32,
    pub size: Vec2,
    pub grounded: bool,
    pub frame: u8,
    pub frame_timer: f32,
    pub visible: bool,
}

impl Actor {
    pub fn new(kind: ActorKind, x: f32) -> Self {
        let size = kind.size();
        Self {
            kind,
            pos: Vec2::new(x, ground_y() - size.y),
            dy: 0.0,
            size,
            grounded: true,
            frame: 0,
            frame_timer: 0.0,
            visible: true,
        }
    }

    /// Put the actor on the ground at `x`, standing still
    pub fn place(&mut self, x: f32, visible: bool) {
        self.pos = Vec2::new(x, ground_y() - self.size.y);
        self.dy = 0.0;
        self.grounded = true;
        self.frame = 0;
        self.frame_timer = 0.0;
        self.visible = visible;
    }

    /// Gravity, ground clamp and run-cycle animation
    pub fn update(&mut self, gravity: f32, dt: f32) {
        self.dy += gravity * dt;
        self.pos.y += self.dy * dt;

        let ground = ground_y();
        if self.pos.y + self.size.y > ground {
            self.pos.y = ground - self.size.y;
            self.dy = 0.0;
            self.grounded = true;
        }

        if self.grounded {
            self.frame_timer += dt;
            if self.frame_timer > RUN_FRAME_TIME {
                self.frame = (self.frame + 1) % RUN_FRAMES;
                self.frame_timer = 0.0;
            }
        } else {
            self.frame = 0;
        }
    }

    /// Start a jump if standing. Returns whether a jump began.
    pub fn jump(&mut self, jump_force: f32) -> bool {
        if !self.grounded {
            return false;
        }
        self.dy = -jump_force;
        self.grounded = false;
        true
    }

    /// Cut an ascending jump short
    pub fn release(&mut self, release_velocity: f32) {
        if self.dy < release_velocity {
            self.dy = release_velocity;
        }
    }

    /// Move horizontally toward `target_x` by at most `step`.
    /// Returns true once the target is reached.
    pub fn slide_toward(&mut self, target_x: f32, step: f32) -> bool {
        let delta = target_x - self.pos.x;
        if delta.abs() <= step {
            self.pos.x = target_x;
            true
        } else {
            self.pos.x += step * delta.signum();
            false
        }
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}
