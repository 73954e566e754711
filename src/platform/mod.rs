//! Platform abstraction layer
//!
//! Browser event plumbing lives in `main.rs`; this module holds the
//! platform-neutral mapping from raw events to game input.

pub mod input;

pub use input::{InputSignal, JUMP_KEY, SettingsToggle, TouchResponse};
