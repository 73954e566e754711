//! Game state and core simulation types
//!
//! One owned session context: everything a frame mutates lives here, so a
//! restart is a single `reset`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::actor::{Actor, ActorKind};
use super::collision::{Rect, apply_speed_ramp};
use super::dialogue::{DialogueLine, SequenceScript, TriggerScript};
use super::layer::ParallaxLayer;
use super::particles::Particle;
use super::schedule::Schedule;
use super::spawn::{Collectible, Obstacle};
use crate::assets::ImageId;
use crate::consts::*;
use crate::tuning::Tuning;

/// Narrative stage of a session. Only ever advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StoryPhase {
    /// Pudding runs alone
    Solo1,
    /// Noodle catches up while the backdrop changes
    Transition,
    /// Noodle takes over
    Solo2,
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Collected { at: Vec2 },
    ObstaclePassed,
    SpeedUp { speed: f32 },
    PhaseChanged(StoryPhase),
    LeadExited,
    GameOver { score: u64 },
}

/// Complete per-session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed this session was started with
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,

    pub score: u64,
    pub speed: f32,
    pub next_speed_threshold: u64,
    pub phase: StoryPhase,
    /// Elapsed conceptual 60 Hz frames (fractional, advanced by dt)
    pub frames: f32,
    pub next_spawn_frame: f32,
    pub game_over: bool,

    pub pudding: Actor,
    pub noodle: Actor,
    /// Pudding has left the screen after the handoff
    pub lead_exited: bool,
    /// Spawn-free frame-units remaining after the handoff
    pub handoff_cooldown: f32,

    pub far: ParallaxLayer,
    pub mid: ParallaxLayer,
    pub fg: ParallaxLayer,

    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    pub particles: Vec<Particle>,

    pub pre_dialogue: TriggerScript,
    pub post_dialogue: SequenceScript,
    pub schedule: Schedule,

    /// Cosmetic switches (from player settings)
    pub particles_enabled: bool,
    pub bob_enabled: bool,

    /// Events emitted by the last tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut noodle = Actor::new(ActorKind::Noodle, -ActorKind::Noodle.size().x);
        noodle.visible = false;

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            speed: tuning.start_speed,
            next_speed_threshold: tuning.speed_threshold_step,
            phase: StoryPhase::Solo1,
            frames: 0.0,
            next_spawn_frame: tuning.first_spawn_frame,
            game_over: false,
            pudding: Actor::new(ActorKind::Pudding, PLAYER_X),
            noodle,
            lead_exited: false,
            handoff_cooldown: 0.0,
            far: ParallaxLayer::new(ImageId::BgFar, FAR_SPEED),
            mid: ParallaxLayer::new(ImageId::BgMid, MID_SPEED),
            fg: ParallaxLayer::new(ImageId::Foreground, FG_SPEED),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            particles: Vec::new(),
            pre_dialogue: TriggerScript::default(),
            post_dialogue: SequenceScript::default(),
            schedule: Schedule::default(),
            particles_enabled: true,
            bob_enabled: true,
            events: Vec::new(),
            tuning,
        }
    }

    /// Return every subsystem to its session-start value
    pub fn reset(&mut self, seed: u64) {
        let tuning = self.tuning.clone();
        let particles_enabled = self.particles_enabled;
        let bob_enabled = self.bob_enabled;
        *self = Self::with_tuning(seed, tuning);
        self.particles_enabled = particles_enabled;
        self.bob_enabled = bob_enabled;
    }

    /// The character the player controls and that collides
    pub fn active_actor(&self) -> &Actor {
        if self.phase == StoryPhase::Solo2 && self.lead_exited {
            &self.noodle
        } else {
            &self.pudding
        }
    }

    pub fn active_actor_mut(&mut self) -> &mut Actor {
        if self.phase == StoryPhase::Solo2 && self.lead_exited {
            &mut self.noodle
        } else {
            &mut self.pudding
        }
    }

    /// The on-screen character following the player's one, if any
    pub fn trailing_actor_mut(&mut self) -> Option<&mut Actor> {
        let trailing = match self.phase {
            StoryPhase::Solo1 => false,
            StoryPhase::Transition => true,
            StoryPhase::Solo2 => !self.lead_exited,
        };
        if trailing && self.noodle.visible {
            Some(&mut self.noodle)
        } else {
            None
        }
    }

    /// Collision box of the active character
    pub fn active_rect(&self) -> Rect {
        let actor = self.active_actor();
        Rect::from_pos_size(actor.pos, actor.size)
    }

    /// No entities are emitted during the handoff and its cool-down
    pub fn spawning_suppressed(&self) -> bool {
        match self.phase {
            StoryPhase::Solo1 => false,
            StoryPhase::Transition => true,
            StoryPhase::Solo2 => !self.lead_exited || self.handoff_cooldown > 0.0,
        }
    }

    /// Award points and run the speed staircase
    pub fn add_score(&mut self, points: u64) {
        self.score += points;
        let steps = apply_speed_ramp(
            self.score,
            &mut self.speed,
            &mut self.next_speed_threshold,
            self.tuning.speed_step,
            self.tuning.speed_threshold_step,
            self.tuning.max_speed,
        );
        if steps > 0 {
            log::debug!("speed up to {:.2} at score {}", self.speed, self.score);
            self.events.push(GameEvent::SpeedUp { speed: self.speed });
        }
    }

    /// Line currently shown, whichever script owns it
    pub fn current_dialogue(&self) -> Option<&DialogueLine> {
        match self.phase {
            StoryPhase::Solo1 => self.pre_dialogue.current.as_ref().map(|a| &a.line),
            StoryPhase::Transition => None,
            StoryPhase::Solo2 => self.post_dialogue.current(),
        }
    }

    pub fn actor(&self, kind: ActorKind) -> &Actor {
        match kind {
            ActorKind::Pudding => &self.pudding,
            ActorKind::Noodle => &self.noodle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::ground_y;

    #[test]
    fn test_new_session_values() {
        let state = GameState::new(1);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, START_SPEED);
        assert_eq!(state.phase, StoryPhase::Solo1);
        assert_eq!(state.next_spawn_frame, 50.0);
        assert!(state.pudding.visible && state.pudding.grounded);
        assert_eq!(state.pudding.pos.y + state.pudding.size.y, ground_y());
        assert!(!state.noodle.visible);
        assert_eq!(state.active_actor().kind, ActorKind::Pudding);
    }

    #[test]
    fn test_active_actor_follows_handoff() {
        let mut state = GameState::new(1);
        state.phase = StoryPhase::Solo2;
        assert_eq!(state.active_actor().kind, ActorKind::Pudding);
        state.lead_exited = true;
        assert_eq!(state.active_actor().kind, ActorKind::Noodle);
    }

    #[test]
    fn test_suppression_windows() {
        let mut state = GameState::new(1);
        assert!(!state.spawning_suppressed());
        state.phase = StoryPhase::Transition;
        assert!(state.spawning_suppressed());
        state.phase = StoryPhase::Solo2;
        assert!(state.spawning_suppressed());
        state.lead_exited = true;
        state.handoff_cooldown = 10.0;
        assert!(state.spawning_suppressed());
        state.handoff_cooldown = 0.0;
        assert!(!state.spawning_suppressed());
    }

    #[test]
    fn test_add_score_ramps_speed() {
        let mut state = GameState::new(1);
        state.add_score(5);
        state.add_score(5);
        assert_eq!(state.speed, 5.25);
        assert_eq!(state.events, vec![GameEvent::SpeedUp { speed: 5.25 }]);
    }
}
