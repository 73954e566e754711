//! 2D rendering
//!
//! Every frame is a full clear and redraw against a `Surface`. Images that
//! have not loaded yet are drawn as solid placeholder rectangles.

pub mod scene;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use scene::draw_frame;
#[cfg(target_arch = "wasm32")]
pub use web::WebSurface;

use crate::assets::ImageId;
use crate::sim::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Font, colour and alignment for a text draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle<'a> {
    pub font: &'a str,
    pub color: &'a str,
    pub align: TextAlign,
}

/// Immediate-mode drawing surface in logical canvas pixels
pub trait Surface {
    fn clear(&mut self);
    /// Whether `image` can be drawn yet
    fn image_ready(&self, image: ImageId) -> bool;
    fn draw_image(&mut self, image: ImageId, dest: Rect);
    /// Draw the `src` region of `image` into `dest`
    fn draw_sprite(&mut self, image: ImageId, src: Rect, dest: Rect);
    fn fill_rect(&mut self, rect: Rect, color: &str);
    fn set_alpha(&mut self, alpha: f32);
    /// Soft shadow around subsequent draws; blur 0 turns it off
    fn set_glow(&mut self, blur: f32, color: &str);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle);
    fn measure_text(&mut self, text: &str, font: &str) -> f32;
}

/// Draw `image` or its placeholder colour
pub fn image_or_placeholder(surface: &mut dyn Surface, image: ImageId, dest: Rect) {
    if surface.image_ready(image) {
        surface.draw_image(image, dest);
    } else {
        surface.fill_rect(dest, image.placeholder_color());
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use std::collections::HashSet;

    use super::*;

    /// A recorded draw call
    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawOp {
        Clear,
        Image(ImageId, Rect),
        Sprite(ImageId, Rect, Rect),
        Fill(Rect, String),
        Alpha(f32),
        Glow(f32),
        Text(String, TextAlign),
    }

    /// Surface that records calls; images in `ready` count as loaded
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub ops: Vec<DrawOp>,
        pub ready: HashSet<ImageId>,
    }

    impl RecordingSurface {
        pub fn all_loaded() -> Self {
            Self {
                ops: Vec::new(),
                ready: ImageId::ALL.iter().copied().collect(),
            }
        }

        pub fn texts(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    DrawOp::Text(text, _) => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self) {
            self.ops.push(DrawOp::Clear);
        }

        fn image_ready(&self, image: ImageId) -> bool {
            self.ready.contains(&image)
        }

        fn draw_image(&mut self, image: ImageId, dest: Rect) {
            self.ops.push(DrawOp::Image(image, dest));
        }

        fn draw_sprite(&mut self, image: ImageId, src: Rect, dest: Rect) {
            self.ops.push(DrawOp::Sprite(image, src, dest));
        }

        fn fill_rect(&mut self, rect: Rect, color: &str) {
            self.ops.push(DrawOp::Fill(rect, color.to_string()));
        }

        fn set_alpha(&mut self, alpha: f32) {
            self.ops.push(DrawOp::Alpha(alpha));
        }

        fn set_glow(&mut self, blur: f32, _color: &str) {
            self.ops.push(DrawOp::Glow(blur));
        }

        fn fill_text(&mut self, text: &str, _x: f32, _y: f32, style: &TextStyle) {
            self.ops.push(DrawOp::Text(text.to_string(), style.align));
        }

        fn measure_text(&mut self, text: &str, _font: &str) -> f32 {
            text.len() as f32 * 8.0
        }
    }
}
