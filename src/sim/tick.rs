//! Per-frame simulation step
//!
//! Update order: frame counter, story phase, scheduled events, background
//! layers, actors, dialogue, spawner, collectibles, obstacles, particles,
//! foreground. A collision ends the tick immediately.

use rand::Rng;

use super::collision::{Rect, hits_obstacle};
use super::phase::update_story;
use super::schedule::ScheduledAction;
use super::spawn::spawn_due;
use super::state::{GameEvent, GameState, StoryPhase};
use super::particles;
use crate::consts::*;

/// Input gathered since the previous frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump key or touch went down
    pub press: bool,
    /// Jump key or touch went up (after any press this frame)
    pub release: bool,
}

/// Advance the game state by `dt` frame-units
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.game_over {
        return;
    }
    state.events.clear();

    apply_input(state, input);

    state.frames += dt;

    update_story(state, dt);
    run_scheduled(state);

    let speed = state.speed;
    state.far.update(speed, dt);
    state.mid.update(speed, dt);

    let gravity = state.tuning.gravity;
    for actor in [&mut state.pudding, &mut state.noodle] {
        if actor.visible {
            actor.update(gravity, dt);
        }
    }

    match state.phase {
        StoryPhase::Solo1 => state.pre_dialogue.update(state.score, dt),
        StoryPhase::Transition => {}
        StoryPhase::Solo2 => state.post_dialogue.update(dt),
    }

    spawn_due(state);

    update_collectibles(state, dt);

    if update_obstacles(state, dt) {
        state.game_over = true;
        log::info!("Game over at score {}", state.score);
        state.events.push(GameEvent::GameOver { score: state.score });
        return;
    }

    particles::update(&mut state.particles, dt);
    state.fg.update(speed, dt);
}

fn apply_input(state: &mut GameState, input: &TickInput) {
    let jump_force = state.tuning.jump_force;
    if input.press && state.active_actor_mut().jump(jump_force) {
        if state.trailing_actor_mut().is_some() {
            let due = state.frames + state.tuning.mimic_delay;
            state.schedule.push(due, state.phase, ScheduledAction::MimicJump);
        }
    }
    if input.release {
        let release = state.tuning.release_velocity;
        state.active_actor_mut().release(release);
    }
}

fn run_scheduled(state: &mut GameState) {
    let jump_force = state.tuning.jump_force;
    for action in state.schedule.drain_due(state.frames, state.phase) {
        match action {
            ScheduledAction::MimicJump => {
                // The trailing actor may have left since the jump was queued
                if let Some(trailing) = state.trailing_actor_mut() {
                    trailing.jump(jump_force);
                }
            }
        }
    }
}

fn update_collectibles(state: &mut GameState, dt: f32) {
    let speed = state.speed;
    let frames = state.frames;
    let bob = state.bob_enabled;
    let actor = state.active_rect();

    let mut collected = Vec::new();
    for page in state.collectibles.iter_mut() {
        page.pos.x -= speed * dt;
        page.pos.y = if bob {
            page.base_y + (frames * 0.05 + page.float_offset).sin() * 5.0
        } else {
            page.base_y
        };

        if !page.collected && actor.intersects(&Rect::from_pos_size(page.pos, page.size)) {
            page.collected = true;
            collected.push(page.pos + page.size * 0.5);
        }
    }
    state
        .collectibles
        .retain(|page| !page.collected && page.pos.x + page.size.x >= 0.0);

    for at in collected {
        let bonus = state.tuning.collectible_bonus;
        state.add_score(bonus);
        if state.particles_enabled {
            let count = state.tuning.particle_count;
            particles::burst(&mut state.rng, &mut state.particles, at, count);
        }
        state.events.push(GameEvent::Collected { at });
    }
}

/// Returns true when the active actor hit an obstacle
fn update_obstacles(state: &mut GameState, dt: f32) -> bool {
    let speed = state.speed;
    let margin = state.tuning.collision_margin;
    let actor = state.active_rect();

    let mut passed = 0;
    let mut i = 0;
    while i < state.obstacles.len() {
        let obstacle = &mut state.obstacles[i];
        obstacle.pos.x -= speed * dt;

        if hits_obstacle(&actor, &Rect::from_pos_size(obstacle.pos, obstacle.size), margin) {
            return true;
        }

        if obstacle.pos.x + obstacle.size.x < 0.0 {
            state.obstacles.remove(i);
            passed += 1;
        } else {
            i += 1;
        }
    }

    for _ in 0..passed {
        state.add_score(OBSTACLE_PASS_BONUS);
        state.events.push(GameEvent::ObstaclePassed);
    }
    false
}

/// Simple autopilot used by the headless runner: jump when an obstacle is close
pub fn autopilot_input<R: Rng>(state: &GameState, rng: &mut R) -> TickInput {
    let actor = state.active_actor();
    let reaction = 55.0 + state.speed * 6.0 + rng.random::<f32>() * 10.0;
    let threat = state.obstacles.iter().any(|ob| {
        let gap = ob.pos.x - actor.right();
        (0.0..reaction).contains(&gap)
    });
    TickInput {
        press: threat && actor.grounded,
        release: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::{ActorKind, ground_y};
    use crate::sim::spawn::{Collectible, Obstacle, Tier};
    use glam::Vec2;
    use proptest::prelude::*;

    fn quiet_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        // Keep the spawner out of the way
        state.next_spawn_frame = f32::MAX;
        state
    }

    #[test]
    fn test_obstacle_collision_ends_game() {
        let mut state = quiet_state(1);
        let mut ob = Obstacle::new(Tier::Mid, StoryPhase::Solo1);
        ob.pos.x = state.pudding.pos.x + 20.0;
        state.obstacles.push(ob);

        tick(&mut state, &TickInput::default(), 1.0);
        assert!(state.game_over);
        assert_eq!(state.events.last(), Some(&GameEvent::GameOver { score: 0 }));

        // Nothing moves after game over
        let frames = state.frames;
        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.frames, frames);
    }

    #[test]
    fn test_passing_obstacle_scores() {
        let mut state = quiet_state(1);
        let mut ob = Obstacle::new(Tier::Low, StoryPhase::Solo1);
        ob.pos.x = -ob.size.x + 2.0;
        state.obstacles.push(ob);

        tick(&mut state, &TickInput::default(), 1.0);
        assert!(!state.game_over);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 1);
        assert!(state.events.contains(&GameEvent::ObstaclePassed));
    }

    #[test]
    fn test_collect_awards_and_bursts() {
        let mut state = quiet_state(1);
        let mut page = Collectible::new(Tier::Low, 0.0);
        page.base_y = state.pudding.pos.y;
        page.pos = Vec2::new(state.pudding.pos.x + 10.0, page.base_y);
        state.collectibles.push(page);

        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.score, 5);
        assert!(state.collectibles.is_empty());
        assert_eq!(state.particles.len(), 20);
        assert!(matches!(state.events[0], GameEvent::Collected { .. }));
    }

    #[test]
    fn test_particles_respect_settings() {
        let mut state = quiet_state(1);
        state.particles_enabled = false;
        let mut page = Collectible::new(Tier::Low, 0.0);
        page.base_y = state.pudding.pos.y;
        page.pos = Vec2::new(state.pudding.pos.x, page.base_y);
        state.collectibles.push(page);

        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.score, 5);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_jump_clears_low_obstacle() {
        let mut state = quiet_state(1);
        let mut ob = Obstacle::new(Tier::Low, StoryPhase::Solo1);
        ob.pos.x = state.pudding.right() + 40.0;
        state.obstacles.push(ob);

        let press = TickInput {
            press: true,
            release: false,
        };
        tick(&mut state, &press, 1.0);
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), 1.0);
        }
        assert!(!state.game_over);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_stall_moves_at_most_max_dt() {
        let mut state = quiet_state(1);
        state.pudding.jump(JUMP_FORCE);
        let before = state.pudding.pos.y;

        let mut clock = crate::sim::FrameClock::new();
        clock.seed(0.0);
        let dt = clock.advance(10_000.0);
        tick(&mut state, &TickInput::default(), dt);

        // dy after one step of MAX_DT
        let max_move = (-JUMP_FORCE + GRAVITY * MAX_DT).abs() * MAX_DT;
        assert!((state.pudding.pos.y - before).abs() <= max_move + 1e-3);
        assert!((state.far.x.abs() - FAR_SPEED * START_SPEED * MAX_DT).abs() < 1e-3);
    }

    #[test]
    fn test_mimic_jump_follows_lead() {
        let mut state = quiet_state(1);
        state.score = 100;
        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.phase, StoryPhase::Transition);

        let press = TickInput {
            press: true,
            release: false,
        };
        tick(&mut state, &press, 1.0);
        assert!(!state.pudding.grounded);
        assert!(state.noodle.grounded);
        assert_eq!(state.schedule.len(), 1);

        for _ in 0..12 {
            tick(&mut state, &TickInput::default(), 1.0);
        }
        assert!(!state.noodle.grounded);
        assert!(state.schedule.is_empty());
    }

    #[test]
    fn test_stale_mimic_jump_is_ignored() {
        let mut state = quiet_state(1);
        state.phase = StoryPhase::Transition;
        state.noodle.place(10.0, true);
        state
            .schedule
            .push(state.frames + 5.0, StoryPhase::Transition, ScheduledAction::MimicJump);

        // Phase moves on before the event is due
        state.phase = StoryPhase::Solo2;
        state.lead_exited = true;
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), 1.0);
        }
        assert!(state.noodle.grounded);
        assert!(state.schedule.is_empty());
    }

    #[test]
    fn test_noodle_controlled_after_handoff() {
        let mut state = quiet_state(1);
        state.phase = StoryPhase::Solo2;
        state.lead_exited = true;
        state.pudding.visible = false;
        state.noodle.place(PLAYER_X, true);

        let press = TickInput {
            press: true,
            release: true,
        };
        tick(&mut state, &press, 1.0);
        assert_eq!(state.active_actor().kind, ActorKind::Noodle);
        assert!(!state.noodle.grounded);
        // Tap: released immediately, so upward speed is capped
        assert!(state.noodle.dy >= RELEASE_VELOCITY);
        assert!(state.noodle.pos.y + state.noodle.size.y < ground_y());
    }

    #[test]
    fn test_full_story_with_autopilot() {
        use rand::SeedableRng;
        let mut state = GameState::new(42);
        let mut pilot = rand_pcg::Pcg32::seed_from_u64(7);
        // Skip straight to the story threshold
        state.score = 100;

        let mut seen = Vec::new();
        for _ in 0..5000 {
            let input = autopilot_input(&state, &mut pilot);
            tick(&mut state, &input, 1.0);
            for event in &state.events {
                if let GameEvent::PhaseChanged(phase) = event {
                    seen.push(*phase);
                }
            }
            if state.lead_exited || state.game_over {
                break;
            }
        }
        assert_eq!(seen, vec![StoryPhase::Transition, StoryPhase::Solo2]);
        assert!(state.lead_exited);
        assert!(!state.game_over);
    }

    proptest! {
        #[test]
        fn prop_score_and_speed_monotone(seed in any::<u64>(), presses in proptest::collection::vec(any::<bool>(), 1..400)) {
            let mut state = GameState::new(seed);
            let mut last_score = 0;
            let mut last_speed = state.speed;
            for press in presses {
                let input = TickInput { press, release: !press };
                tick(&mut state, &input, 1.0);
                prop_assert!(state.score >= last_score);
                prop_assert!(state.speed >= last_speed);
                prop_assert!(state.speed <= MAX_SPEED);
                last_score = state.score;
                last_speed = state.speed;
                if state.game_over {
                    break;
                }
            }
        }

        #[test]
        fn prop_phase_never_regresses(seed in any::<u64>(), boosts in proptest::collection::vec(0u64..40, 1..300)) {
            let mut state = GameState::new(seed);
            let mut last = state.phase;
            for boost in boosts {
                state.score += boost;
                tick(&mut state, &TickInput::default(), 2.0);
                prop_assert!(state.phase >= last);
                last = state.phase;
                if state.game_over {
                    break;
                }
            }
        }
    }
}
