//! Story progression: Solo1 -> Transition -> Solo2
//!
//! Transition starts on score. Solo2 starts once the mid layer's visible
//! backdrop becomes the phase-2 theme, i.e. the queued transition strip has
//! fully scrolled through. The progression is one-way within a session.

use super::actor::ActorKind;
use super::state::{GameEvent, GameState, StoryPhase};
use crate::assets::{Backdrop, ImageId};
use crate::consts::*;

/// Layer speeds while the transition strip scrolls in
pub const TRANSITION_FAR_SPEED: f32 = 0.4;
pub const TRANSITION_MID_SPEED: f32 = 1.0;

/// Horizontal slide rates (pixels per frame-unit)
pub const ENTRANCE_SPEED: f32 = 2.0;
pub const EXIT_SPEED: f32 = 3.0;

/// Noodle's x once it is fully on screen and the post-handoff script can play
pub const DIALOGUE_START_X: f32 = 0.0;

/// Evaluate phase transitions and drive the handoff choreography
pub fn update_story(state: &mut GameState, dt: f32) {
    match state.phase {
        StoryPhase::Solo1 => {
            if state.score >= state.tuning.transition_score {
                begin_transition(state);
            }
        }
        StoryPhase::Transition => {
            let target = state.pudding.pos.x - FOLLOW_OFFSET;
            state.noodle.slide_toward(target, ENTRANCE_SPEED * dt);

            if state.mid.wrapped() && state.mid.active_backdrop() == Some(Backdrop::Phase2) {
                begin_solo2(state);
            }
        }
        StoryPhase::Solo2 => update_handoff(state, dt),
    }
}

fn begin_transition(state: &mut GameState) {
    log::info!("Transition at score {}", state.score);
    state.phase = StoryPhase::Transition;

    let noodle_width = state.noodle.size.x;
    state.noodle.place(-noodle_width, true);

    // Clear the lane for the entrance
    state.obstacles.clear();

    state
        .far
        .queue_transition(&[ImageId::BgFarTransition, ImageId::BgFar2]);
    state
        .mid
        .queue_transition(&[ImageId::BgMidTransition, ImageId::BgMid2]);
    state.far.speed_modifier = TRANSITION_FAR_SPEED;
    state.mid.speed_modifier = TRANSITION_MID_SPEED;

    state.pre_dialogue.silence();
    state.events.push(GameEvent::PhaseChanged(StoryPhase::Transition));
}

fn begin_solo2(state: &mut GameState) {
    log::info!("Handoff begins at frame {:.0}", state.frames);
    state.phase = StoryPhase::Solo2;
    state.far.speed_modifier = FAR_SPEED;
    state.mid.speed_modifier = MID_SPEED;
    state.events.push(GameEvent::PhaseChanged(StoryPhase::Solo2));
}

fn update_handoff(state: &mut GameState, dt: f32) {
    if state.noodle.pos.x >= DIALOGUE_START_X {
        state.post_dialogue.start();
    }

    if state.lead_exited {
        if state.handoff_cooldown > 0.0 {
            state.handoff_cooldown = (state.handoff_cooldown - dt).max(0.0);
        }
        state.noodle.slide_toward(PLAYER_X, ENTRANCE_SPEED * dt);
        return;
    }

    // Pudding stays for its own lines; Noodle keeps its place behind
    if !state.post_dialogue.started || state.post_dialogue.speaks_later(ActorKind::Pudding) {
        let target = state.pudding.pos.x - FOLLOW_OFFSET;
        state.noodle.slide_toward(target, ENTRANCE_SPEED * dt);
        return;
    }

    let offscreen = -state.pudding.size.x;
    if state.pudding.slide_toward(offscreen, EXIT_SPEED * dt) {
        state.pudding.visible = false;
        state.lead_exited = true;
        state.handoff_cooldown = state.tuning.handoff_cooldown;
        log::info!("Pudding exited; Noodle takes over");
        state.events.push(GameEvent::LeadExited);
    }
    state.noodle.slide_toward(PLAYER_X, ENTRANCE_SPEED * dt);
}
