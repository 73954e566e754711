//! Session controller
//!
//! Idle (instructions shown) -> Running (one frame callback per refresh) ->
//! GameOver (overlay, restart debounced) -> Idle on replay input, which
//! immediately starts the next session.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::highscores::HighScore;
use crate::platform::InputSignal;
use crate::settings::Settings;
use crate::sim::{FrameClock, GameEvent, GameState, StoryPhase, TickInput, tick};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionStatus {
    Idle,
    Running,
    /// Ended at the given timestamp (ms)
    GameOver { at: f64 },
}

/// What an input edge did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// A new session began; the caller must (re)arm the frame loop
    Started,
    /// Recorded for the next frame
    Queued,
    Ignored,
}

/// Result of one frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Schedule another frame
    Continue,
    /// The session just ended; do not schedule another frame
    GameOver { new_best: bool },
    /// Not running; nothing was simulated
    Stopped,
}

/// Running tally of what happened in the current session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStats {
    pub pages: u32,
    pub obstacles_passed: u32,
    pub top_speed: f32,
    pub reached: StoryPhase,
    pub handed_off: bool,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self {
            pages: 0,
            obstacles_passed: 0,
            top_speed: 0.0,
            reached: StoryPhase::Solo1,
            handed_off: false,
        }
    }
}

impl SessionStats {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Collected { .. } => self.pages += 1,
            GameEvent::ObstaclePassed => self.obstacles_passed += 1,
            GameEvent::SpeedUp { speed } => self.top_speed = self.top_speed.max(*speed),
            GameEvent::PhaseChanged(phase) => self.reached = self.reached.max(*phase),
            GameEvent::LeadExited => self.handed_off = true,
            GameEvent::GameOver { .. } => {}
        }
    }
}

/// Owns the session state and drives it from timestamps and input edges
#[derive(Debug, Clone)]
pub struct Game {
    pub state: GameState,
    pub status: SessionStatus,
    pub high_score: HighScore,
    pub settings: Settings,
    pub stats: SessionStats,
    clock: FrameClock,
    input: TickInput,
    seeds: Pcg32,
    sessions: u32,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning, settings: Settings, high_score: HighScore) -> Self {
        let mut state = GameState::with_tuning(seed, tuning);
        state.particles_enabled = settings.effective_particles();
        state.bob_enabled = settings.effective_bob();
        Self {
            state,
            status: SessionStatus::Idle,
            high_score,
            settings,
            stats: SessionStats::default(),
            clock: FrameClock::new(),
            input: TickInput::default(),
            seeds: Pcg32::seed_from_u64(seed),
            sessions: 0,
        }
    }

    /// Handle a press or release at timestamp `now` (ms)
    pub fn handle_input(&mut self, signal: InputSignal, now: f64) -> InputOutcome {
        match (signal, self.status) {
            (InputSignal::Press, SessionStatus::Idle) => {
                self.start(now);
                InputOutcome::Started
            }
            (InputSignal::Press, SessionStatus::Running) => {
                self.input.press = true;
                InputOutcome::Queued
            }
            (InputSignal::Release, SessionStatus::Running) => {
                self.input.release = true;
                InputOutcome::Queued
            }
            (InputSignal::Press, SessionStatus::GameOver { at }) => {
                if self.restart_ready(now) {
                    log::debug!("restart accepted {:.0}ms after game over", now - at);
                    self.status = SessionStatus::Idle;
                    self.start(now);
                    InputOutcome::Started
                } else {
                    InputOutcome::Ignored
                }
            }
            (InputSignal::Release, _) => InputOutcome::Ignored,
        }
    }

    /// Whether the game-over overlay accepts a restart yet
    pub fn restart_ready(&self, now: f64) -> bool {
        match self.status {
            SessionStatus::GameOver { at } => now - at >= self.state.tuning.restart_debounce_ms,
            _ => false,
        }
    }

    /// Reset every subsystem and begin a session
    pub fn start(&mut self, now: f64) {
        if self.status == SessionStatus::Running {
            return;
        }
        self.state.reset(self.seeds.random::<u64>());
        self.state.particles_enabled = self.settings.effective_particles();
        self.state.bob_enabled = self.settings.effective_bob();
        self.clock.seed(now);
        self.input = TickInput::default();
        self.stats = SessionStats {
            top_speed: self.state.speed,
            ..Default::default()
        };
        self.status = SessionStatus::Running;
        self.sessions += 1;
        log::info!("Session {} started (seed {})", self.sessions, self.state.seed);
    }

    /// One display-refresh callback stamped `now` (ms)
    pub fn frame(&mut self, now: f64) -> FrameOutcome {
        if self.status != SessionStatus::Running {
            return FrameOutcome::Stopped;
        }

        let dt = self.clock.advance(now);
        let input = std::mem::take(&mut self.input);
        tick(&mut self.state, &input, dt);
        for event in &self.state.events {
            self.stats.record(event);
        }

        if self.state.game_over {
            let new_best = self.high_score.submit(self.state.score);
            self.status = SessionStatus::GameOver { at: now };
            log::info!(
                "Session {} over: score {}, best {}{}, {} pages, {} obstacles, {:?}",
                self.sessions,
                self.state.score,
                self.high_score.best(),
                if new_best { " (new best)" } else { "" },
                self.stats.pages,
                self.stats.obstacles_passed,
                self.stats.reached
            );
            return FrameOutcome::GameOver { new_best };
        }
        FrameOutcome::Continue
    }

    /// Apply changed preferences
    pub fn set_settings(&mut self, settings: Settings) {
        self.state.particles_enabled = settings.effective_particles();
        self.state.bob_enabled = settings.effective_bob();
        self.settings = settings;
    }

    pub fn sessions(&self) -> u32 {
        self.sessions
    }
}
