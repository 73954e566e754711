//! Parallax scrolling strips
//!
//! Each layer holds two image slots. The active image is drawn at `x`, the
//! buffer image directly to its right. When `x` wraps past one tile width the
//! buffer is promoted to active and the next queued image (if any) becomes
//! the new buffer, so a new backdrop scrolls in without a jump cut.

use std::collections::VecDeque;

use crate::assets::{Backdrop, ImageId};
use crate::consts::LAYER_WIDTH;

/// A horizontally scrolling background or foreground strip
#[derive(Debug, Clone)]
pub struct ParallaxLayer {
    pub active: ImageId,
    pub buffer: ImageId,
    pub queue: VecDeque<ImageId>,
    /// Horizontal offset, always in (-width, 0]
    pub x: f32,
    /// Fraction of the global game speed
    pub speed_modifier: f32,
    pub width: f32,
    /// Set on the frame a promotion happened, cleared on the next update
    wrapped: bool,
}

impl ParallaxLayer {
    pub fn new(image: ImageId, speed_modifier: f32) -> Self {
        Self {
            active: image,
            buffer: image,
            queue: VecDeque::new(),
            x: 0.0,
            speed_modifier,
            width: LAYER_WIDTH,
            wrapped: false,
        }
    }

    /// Scroll left by `speed_modifier * game_speed * dt`
    pub fn update(&mut self, game_speed: f32, dt: f32) {
        self.wrapped = false;
        self.x -= self.speed_modifier * game_speed * dt;

        while self.x <= -self.width {
            self.x += self.width;
            self.active = self.buffer;
            self.buffer = self.queue.pop_front().unwrap_or(self.active);
            self.wrapped = true;
        }
    }

    /// Whether the last `update` promoted the buffer image
    pub fn wrapped(&self) -> bool {
        self.wrapped
    }

    /// Queue images behind the current buffer; they appear only after wraps
    pub fn queue_transition(&mut self, images: &[ImageId]) {
        self.queue.extend(images.iter().copied());
    }

    /// Backdrop theme of the visible image
    pub fn active_backdrop(&self) -> Option<Backdrop> {
        self.active.backdrop()
    }

    /// Session reset
    pub fn reset(&mut self, image: ImageId, speed_modifier: f32) {
        self.active = image;
        self.buffer = image;
        self.queue.clear();
        self.x = 0.0;
        self.speed_modifier = speed_modifier;
        self.wrapped = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrolls_by_modifier() {
        let mut layer = ParallaxLayer::new(ImageId::BgMid, 0.5);
        layer.update(10.0, 1.0);
        assert!((layer.x - -5.0).abs() < 1e-5);
        assert!(!layer.wrapped());
    }

    #[test]
    fn test_queue_waits_for_wrap() {
        let mut layer = ParallaxLayer::new(ImageId::BgMid, 1.0);
        layer.queue_transition(&[ImageId::BgMidTransition, ImageId::BgMid2]);
        assert_eq!(layer.active, ImageId::BgMid);
        assert_eq!(layer.buffer, ImageId::BgMid);

        // 1200 / (10 * 1) = 120 frames per wrap
        for _ in 0..119 {
            layer.update(10.0, 1.0);
            assert!(!layer.wrapped());
        }
        layer.update(10.0, 1.0);
        assert!(layer.wrapped());
        assert_eq!(layer.active, ImageId::BgMid);
        assert_eq!(layer.buffer, ImageId::BgMidTransition);

        for _ in 0..120 {
            layer.update(10.0, 1.0);
        }
        assert_eq!(layer.active, ImageId::BgMidTransition);
        assert_eq!(layer.buffer, ImageId::BgMid2);

        for _ in 0..120 {
            layer.update(10.0, 1.0);
        }
        assert_eq!(layer.active_backdrop(), Some(Backdrop::Phase2));
        assert_eq!(layer.buffer, ImageId::BgMid2);
        assert!(layer.queue.is_empty());
    }

    #[test]
    fn test_wrap_flag_lasts_one_frame() {
        let mut layer = ParallaxLayer::new(ImageId::BgFar, 1.0);
        layer.update(LAYER_WIDTH, 1.0);
        assert!(layer.wrapped());
        layer.update(1.0, 1.0);
        assert!(!layer.wrapped());
    }

    #[test]
    fn test_reset_clears_queue() {
        let mut layer = ParallaxLayer::new(ImageId::BgFar, 0.2);
        layer.queue_transition(&[ImageId::BgFar2]);
        layer.update(100.0, 3.0);
        layer.reset(ImageId::BgFar, 0.2);
        assert!(layer.queue.is_empty());
        assert_eq!(layer.x, 0.0);
        assert_eq!(layer.buffer, ImageId::BgFar);
    }
}
