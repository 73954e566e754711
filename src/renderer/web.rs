//! Canvas2D surface for the browser build

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Surface, TextStyle};
use crate::assets::ImageId;
use crate::consts::*;
use crate::sim::Rect;

/// Draws onto a `<canvas>` through its 2D context
pub struct WebSurface {
    ctx: CanvasRenderingContext2d,
    images: HashMap<ImageId, HtmlImageElement>,
}

impl WebSurface {
    /// Get the 2D context and size the canvas to the logical resolution
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            ctx,
            images: HashMap::new(),
        })
    }

    /// Start loading every image. Draws fall back to placeholders until
    /// each one finishes; a failed load just keeps its placeholder.
    pub fn load_images(&mut self) {
        for id in ImageId::ALL {
            match HtmlImageElement::new() {
                Ok(img) => {
                    img.set_src(id.path());
                    self.images.insert(id, img);
                }
                Err(e) => log::warn!("Could not create image for {:?}: {:?}", id, e),
            }
        }
        log::info!("Loading {} images", self.images.len());
    }
}

impl Surface for WebSurface {
    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);
    }

    fn image_ready(&self, image: ImageId) -> bool {
        self.images
            .get(&image)
            .is_some_and(|img| img.complete() && img.natural_width() != 0)
    }

    fn draw_image(&mut self, image: ImageId, dest: Rect) {
        if let Some(img) = self.images.get(&image) {
            let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                img,
                dest.pos.x as f64,
                dest.pos.y as f64,
                dest.size.x as f64,
                dest.size.y as f64,
            );
        }
    }

    fn draw_sprite(&mut self, image: ImageId, src: Rect, dest: Rect) {
        if let Some(img) = self.images.get(&image) {
            let _ = self
                .ctx
                .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                    img,
                    src.pos.x as f64,
                    src.pos.y as f64,
                    src.size.x as f64,
                    src.size.y as f64,
                    dest.pos.x as f64,
                    dest.pos.y as f64,
                    dest.size.x as f64,
                    dest.size.y as f64,
                );
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(
            rect.pos.x as f64,
            rect.pos.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
    }

    fn set_glow(&mut self, blur: f32, color: &str) {
        self.ctx.set_shadow_blur(blur as f64);
        self.ctx.set_shadow_color(if blur > 0.0 { color } else { "transparent" });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        self.ctx.set_font(style.font);
        self.ctx.set_fill_style_str(style.color);
        self.ctx.set_text_align(style.align.as_str());
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }

    fn measure_text(&mut self, text: &str, font: &str) -> f32 {
        self.ctx.set_font(font);
        self.ctx
            .measure_text(text)
            .map(|m| m.width() as f32)
            .unwrap_or(0.0)
    }
}
