//! Pudding Run - an endless-runner mini game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, story phases)
//! - `game`: Session controller (idle / running / game over)
//! - `renderer`: Immediate-mode 2D drawing against a `Surface`
//! - `platform`: Browser input mapping
//! - `persistence`: Key-value storage (LocalStorage on web)
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{Game, SessionStats, SessionStatus};
pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical canvas size (pixels)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 300.0;

    /// Updates per second the per-frame constants are expressed in
    pub const TARGET_FPS: f64 = 60.0;
    /// Milliseconds in one conceptual frame
    pub const OPTIMAL_FRAME_MS: f64 = 1000.0 / TARGET_FPS;
    /// Largest dt multiplier applied in one frame (tab resume, slow frames)
    pub const MAX_DT: f32 = 3.0;

    /// Vertical physics (pixels per frame-unit)
    pub const GRAVITY: f32 = 0.6;
    pub const JUMP_FORCE: f32 = 12.0;
    /// Upward velocity cap applied when the jump input is released
    pub const RELEASE_VELOCITY: f32 = -3.0;
    /// Height of the ground strip at the bottom of the canvas
    pub const GROUND_HEIGHT: f32 = 30.0;

    /// Run-cycle frames and frame-units per frame
    pub const RUN_FRAMES: u8 = 3;
    pub const RUN_FRAME_TIME: f32 = 8.0;

    /// Standard x position of the player-controlled actor
    pub const PLAYER_X: f32 = 120.0;
    /// How far behind the lead actor the trailing actor settles
    pub const FOLLOW_OFFSET: f32 = 90.0;

    /// Game speed (pixels per frame-unit)
    pub const START_SPEED: f32 = 5.0;
    pub const MAX_SPEED: f32 = 20.0;
    pub const SPEED_STEP: f32 = 0.25;
    pub const SPEED_THRESHOLD_STEP: u64 = 10;

    /// Parallax tile width
    pub const LAYER_WIDTH: f32 = 1200.0;
    pub const FAR_SPEED: f32 = 0.2;
    pub const MID_SPEED: f32 = 0.5;
    pub const FG_SPEED: f32 = 1.0;

    /// Scoring
    pub const COLLECTIBLE_BONUS: u64 = 5;
    pub const OBSTACLE_PASS_BONUS: u64 = 1;
    /// Inset applied to both boxes in obstacle collisions
    pub const COLLISION_MARGIN: f32 = 4.0;

    /// Score at which the second character arrives
    pub const TRANSITION_SCORE: u64 = 100;
}
