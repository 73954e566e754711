//! Frame composition
//!
//! Back to front: parallax backdrops, characters, speech bubble, pages,
//! particles, obstacles, foreground strip, HUD, then any session overlay.

use glam::Vec2;

use super::{Surface, TextAlign, TextStyle, image_or_placeholder};
use crate::consts::*;
use crate::game::{Game, SessionStatus};
use crate::sim::{Actor, DialogueLine, GameState, ParallaxLayer, Rect};

const HUD_FONT: &str = "bold 18px Helvetica, Arial, sans-serif";
const HUD_COLOR: &str = "#f8fafc";
const ACCENT: &str = "#e91e8c";
const PAGE_GLOW: &str = "#fbbf24";
const PAGE_GLOW_BLUR: f32 = 15.0;
const OVERLAY_DIM: &str = "rgba(0, 0, 0, 0.7)";

const BUBBLE_FONT: &str = "14px Inter";
const BUBBLE_PADDING: f32 = 8.0;
const BUBBLE_HEIGHT: f32 = 26.0;
const BUBBLE_GAP: f32 = 10.0;

/// Draw one complete frame
pub fn draw_frame(surface: &mut dyn Surface, game: &Game) {
    let state = &game.state;
    surface.clear();

    draw_layer(surface, &state.far);
    draw_layer(surface, &state.mid);

    for actor in [&state.pudding, &state.noodle] {
        if actor.visible {
            draw_actor(surface, actor);
        }
    }

    if game.settings.dialogue
        && let Some(line) = state.current_dialogue()
    {
        draw_bubble(surface, state, line);
    }

    draw_entities(surface, state);
    draw_layer(surface, &state.fg);
    draw_hud(surface, state.score, game.high_score.display(state.score));

    match game.status {
        SessionStatus::Idle => draw_idle(surface, game.high_score.best()),
        SessionStatus::GameOver { .. } => {
            draw_game_over(surface, state.score, game.high_score.best())
        }
        SessionStatus::Running => {}
    }
}

/// Active image at `x`, buffer image immediately after it.
/// The 1px overlap hides the seam.
fn draw_layer(surface: &mut dyn Surface, layer: &ParallaxLayer) {
    let height = CANVAS_HEIGHT;
    image_or_placeholder(
        surface,
        layer.active,
        Rect::new(layer.x, 0.0, layer.width, height),
    );
    image_or_placeholder(
        surface,
        layer.buffer,
        Rect::new(layer.x + layer.width - 1.0, 0.0, layer.width, height),
    );
}

fn draw_actor(surface: &mut dyn Surface, actor: &Actor) {
    let dest = Rect::from_pos_size(actor.pos, actor.size);
    let image = actor.kind.image();
    if surface.image_ready(image) {
        let frame = actor.kind.sprite_frame();
        let src = Rect::from_pos_size(Vec2::new(actor.frame as f32 * frame.x, 0.0), frame);
        surface.draw_sprite(image, src, dest);
    } else {
        surface.fill_rect(dest, image.placeholder_color());
    }
}

fn draw_bubble(surface: &mut dyn Surface, state: &GameState, line: &DialogueLine) {
    let speaker = state.actor(line.speaker);
    if !speaker.visible {
        return;
    }

    let text_width = surface.measure_text(line.text, BUBBLE_FONT);
    let width = text_width + BUBBLE_PADDING * 2.0;
    let center_x = speaker.pos.x + speaker.size.x / 2.0;
    let x = (center_x - width / 2.0).clamp(4.0, (CANVAS_WIDTH - width - 4.0).max(4.0));
    let y = (speaker.pos.y - BUBBLE_GAP - BUBBLE_HEIGHT).max(4.0);

    surface.fill_rect(Rect::new(x, y, width, BUBBLE_HEIGHT), HUD_COLOR);
    surface.fill_text(
        line.text,
        x + width / 2.0,
        y + BUBBLE_HEIGHT - BUBBLE_PADDING,
        &TextStyle {
            font: BUBBLE_FONT,
            color: "#0f172a",
            align: TextAlign::Center,
        },
    );
}

fn draw_entities(surface: &mut dyn Surface, state: &GameState) {
    surface.set_glow(PAGE_GLOW_BLUR, PAGE_GLOW);
    for page in state.collectibles.iter().filter(|c| !c.collected) {
        image_or_placeholder(surface, page.image, Rect::from_pos_size(page.pos, page.size));
    }
    surface.set_glow(0.0, PAGE_GLOW);

    for p in &state.particles {
        surface.set_alpha(p.life.clamp(0.0, 1.0));
        surface.fill_rect(
            Rect::from_pos_size(p.pos, Vec2::splat(p.size)),
            &p.color.css(),
        );
    }
    if !state.particles.is_empty() {
        surface.set_alpha(1.0);
    }

    for ob in &state.obstacles {
        image_or_placeholder(surface, ob.image, Rect::from_pos_size(ob.pos, ob.size));
    }
}

/// Right-aligned `HI` at the edge with `SCORE` to its left
fn draw_hud(surface: &mut dyn Surface, score: u64, hi: u64) {
    let hi_text = format!("HI: {}", hi);
    let right = CANVAS_WIDTH - 20.0;
    surface.fill_text(
        &hi_text,
        right,
        30.0,
        &TextStyle {
            font: HUD_FONT,
            color: HUD_COLOR,
            align: TextAlign::Right,
        },
    );
    let hi_width = surface.measure_text(&hi_text, HUD_FONT);
    surface.fill_text(
        &format!("SCORE: {}   ", score),
        right - hi_width,
        30.0,
        &TextStyle {
            font: HUD_FONT,
            color: ACCENT,
            align: TextAlign::Right,
        },
    );
}

fn centered<'a>(font: &'a str, color: &'a str) -> TextStyle<'a> {
    TextStyle {
        font,
        color,
        align: TextAlign::Center,
    }
}

fn dim(surface: &mut dyn Surface) {
    surface.fill_rect(Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT), OVERLAY_DIM);
}

fn draw_idle(surface: &mut dyn Surface, best: u64) {
    dim(surface);
    let cx = CANVAS_WIDTH / 2.0;
    let cy = CANVAS_HEIGHT / 2.0;
    surface.fill_text("PUDDING RUN", cx, cy - 40.0, &centered("30px Italiana", "#fff"));
    surface.fill_text(
        "SPACE OR TAP TO JUMP, HOLD FOR HIGHER",
        cx,
        cy,
        &centered("14px Inter", "#fff"),
    );
    if best > 0 {
        surface.fill_text(
            &format!("BEST: {}", best),
            cx,
            cy + 25.0,
            &centered("14px Inter", ACCENT),
        );
    }
    surface.fill_text(
        "PRESS SPACE OR TAP TO START",
        cx,
        cy + 55.0,
        &centered("12px Inter", "#fff"),
    );
    surface.fill_text(
        "D: DIALOGUE   P: PARTICLES   M: REDUCED MOTION",
        cx,
        cy + 80.0,
        &centered("11px Inter", "#94a3b8"),
    );
}

fn draw_game_over(surface: &mut dyn Surface, score: u64, best: u64) {
    dim(surface);
    let cx = CANVAS_WIDTH / 2.0;
    let cy = CANVAS_HEIGHT / 2.0;
    surface.fill_text("GAME OVER", cx, cy - 40.0, &centered("30px Italiana", "#fff"));
    surface.fill_text(
        &format!("SCORE: {}", score),
        cx,
        cy,
        &centered("16px Inter", "#fff"),
    );
    surface.fill_text(
        &format!("BEST: {}", best),
        cx,
        cy + 25.0,
        &centered("14px Inter", ACCENT),
    );
    surface.fill_text(
        "PRESS SPACE OR TAP TO RESTART",
        cx,
        cy + 55.0,
        &centered("12px Inter", "#fff"),
    );
}
