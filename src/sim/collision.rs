//! Axis-aligned bounding boxes and the speed ramp
//!
//! Obstacle hits use boxes shrunk by a margin on every side so that touching
//! sprite corners are forgiven; collectible pickups use the true boxes.

use glam::Vec2;

/// An axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Shrink by `margin` on each side
    pub fn inset(&self, margin: f32) -> Rect {
        Rect {
            pos: self.pos + Vec2::splat(margin),
            size: self.size - Vec2::splat(2.0 * margin),
        }
    }

    /// Strict overlap; touching edges do not count
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Obstacle hit test with both boxes inset by `margin`
pub fn hits_obstacle(actor: &Rect, obstacle: &Rect, margin: f32) -> bool {
    actor.inset(margin).intersects(&obstacle.inset(margin))
}

/// Raise speed one step per crossed threshold until capped.
/// Returns the number of steps taken.
pub fn apply_speed_ramp(
    score: u64,
    speed: &mut f32,
    next_threshold: &mut u64,
    step: f32,
    threshold_step: u64,
    max_speed: f32,
) -> u32 {
    let mut steps = 0;
    while score >= *next_threshold && *speed < max_speed {
        *speed = (*speed + step).min(max_speed);
        *next_threshold += threshold_step;
        steps += 1;
    }
    steps
}
