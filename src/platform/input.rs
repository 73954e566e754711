//! Raw key/touch events to game input
//!
//! The jump key and the touch screen share the same press/release semantics:
//! press starts a session (or a restart) or jumps, release cuts a jump short.
//! A few letter keys flip player preferences.

use crate::settings::Settings;

/// `KeyboardEvent.code` of the jump key
pub const JUMP_KEY: &str = "Space";

/// A platform-neutral input edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSignal {
    Press,
    Release,
}

impl InputSignal {
    /// Map a keyboard event; only the jump key counts, auto-repeat is dropped
    pub fn from_key(code: &str, down: bool, repeat: bool) -> Option<Self> {
        if code != JUMP_KEY {
            return None;
        }
        match (down, repeat) {
            (true, false) => Some(InputSignal::Press),
            (true, true) => None,
            (false, _) => Some(InputSignal::Release),
        }
    }

    /// Map a touch start/end
    pub fn from_touch(start: bool) -> Self {
        if start {
            InputSignal::Press
        } else {
            InputSignal::Release
        }
    }
}

/// How to answer a touch anywhere on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchResponse {
    pub signal: InputSignal,
    /// Only touches on the game canvas block scrolling
    pub prevent_default: bool,
}

impl TouchResponse {
    pub fn new(start: bool, on_canvas: bool) -> Self {
        Self {
            signal: InputSignal::from_touch(start),
            prevent_default: on_canvas,
        }
    }
}

/// A preference flipped from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsToggle {
    Dialogue,
    Particles,
    ReducedMotion,
}

impl SettingsToggle {
    /// Toggles fire on key down only
    pub fn from_key(code: &str, down: bool, repeat: bool) -> Option<Self> {
        if !down || repeat {
            return None;
        }
        match code {
            "KeyD" => Some(SettingsToggle::Dialogue),
            "KeyP" => Some(SettingsToggle::Particles),
            "KeyM" => Some(SettingsToggle::ReducedMotion),
            _ => None,
        }
    }

    pub fn apply(self, settings: &Settings) -> Settings {
        let mut next = settings.clone();
        match self {
            SettingsToggle::Dialogue => next.dialogue = !next.dialogue,
            SettingsToggle::Particles => next.particles = !next.particles,
            SettingsToggle::ReducedMotion => next.reduced_motion = !next.reduced_motion,
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(InputSignal::from_key("Space", true, false), Some(InputSignal::Press));
        assert_eq!(InputSignal::from_key("Space", false, false), Some(InputSignal::Release));
        assert_eq!(InputSignal::from_key("Space", true, true), None);
        assert_eq!(InputSignal::from_key("KeyA", true, false), None);
    }

    #[test]
    fn test_touch_mapping() {
        assert_eq!(InputSignal::from_touch(true), InputSignal::Press);
        assert_eq!(InputSignal::from_touch(false), InputSignal::Release);
    }

    #[test]
    fn test_touch_off_canvas_still_plays() {
        let off = TouchResponse::new(true, false);
        assert_eq!(off.signal, InputSignal::Press);
        assert!(!off.prevent_default);

        let on = TouchResponse::new(false, true);
        assert_eq!(on.signal, InputSignal::Release);
        assert!(on.prevent_default);
    }

    #[test]
    fn test_settings_toggles() {
        assert_eq!(
            SettingsToggle::from_key("KeyD", true, false),
            Some(SettingsToggle::Dialogue)
        );
        assert_eq!(SettingsToggle::from_key("KeyD", false, false), None);
        assert_eq!(SettingsToggle::from_key("KeyP", true, true), None);
        assert_eq!(SettingsToggle::from_key("Space", true, false), None);

        let settings = Settings::default();
        let muted = SettingsToggle::Dialogue.apply(&settings);
        assert!(!muted.dialogue);
        assert_eq!(SettingsToggle::Dialogue.apply(&muted), settings);
        assert!(SettingsToggle::ReducedMotion.apply(&settings).reduced_motion);
    }
}
