//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time arrives as a dt multiplier, never read from a clock
//! - Seeded RNG only
//! - Entity lists keep spawn order
//! - No rendering or platform dependencies

pub mod actor;
pub mod clock;
pub mod collision;
pub mod dialogue;
pub mod layer;
pub mod particles;
pub mod phase;
pub mod schedule;
pub mod spawn;
pub mod state;
pub mod tick;

pub use actor::{Actor, ActorKind, ground_y};
pub use clock::FrameClock;
pub use collision::{Rect, apply_speed_ramp, hits_obstacle};
pub use dialogue::{DialogueLine, SequenceScript, TriggerScript};
pub use layer::ParallaxLayer;
pub use particles::{Particle, Rgba};
pub use phase::update_story;
pub use schedule::{Schedule, ScheduledAction};
pub use spawn::{Collectible, Obstacle, Tier, spawn_due};
pub use state::{GameEvent, GameState, StoryPhase};
pub use tick::{TickInput, autopilot_input, tick};
