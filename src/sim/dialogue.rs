//! Scripted dialogue
//!
//! Two independent scripts:
//! - the pre-handoff script is a set of score-gated lines, each shown once;
//! - the post-handoff script is an ordered sequence played one line at a time,
//!   advanced when each line's display time runs out.

use super::actor::ActorKind;

/// A line of dialogue
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueLine {
    pub speaker: ActorKind,
    pub text: &'static str,
    /// Display time in frame-units
    pub duration: f32,
}

/// A pre-handoff line gated on score
#[derive(Debug, Clone)]
pub struct ScoreTrigger {
    pub score: u64,
    pub line: DialogueLine,
    pub shown: bool,
}

/// Line currently on screen
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveLine {
    pub line: DialogueLine,
    pub remaining: f32,
}

const fn line(speaker: ActorKind, text: &'static str, duration: f32) -> DialogueLine {
    DialogueLine {
        speaker,
        text,
        duration,
    }
}

fn pre_handoff_lines() -> Vec<ScoreTrigger> {
    [
        (5, line(ActorKind::Pudding, "Ooh, loose pages!", 120.0)),
        (30, line(ActorKind::Pudding, "Someone dropped a whole chapter.", 150.0)),
        (60, line(ActorKind::Pudding, "Faster... faster!", 120.0)),
        (90, line(ActorKind::Pudding, "I could use a hand here...", 150.0)),
    ]
    .into_iter()
    .map(|(score, line)| ScoreTrigger {
        score,
        line,
        shown: false,
    })
    .collect()
}

fn post_handoff_lines() -> Vec<DialogueLine> {
    vec![
        line(ActorKind::Noodle, "Noodle reporting for duty!", 150.0),
        line(ActorKind::Pudding, "All yours. I need a nap.", 140.0),
        line(ActorKind::Noodle, "Let's find the rest of the book.", 160.0),
    ]
}

/// Score-gated, fire-once lines shown before the second character arrives
#[derive(Debug, Clone)]
pub struct TriggerScript {
    pub triggers: Vec<ScoreTrigger>,
    pub current: Option<ActiveLine>,
}

impl Default for TriggerScript {
    fn default() -> Self {
        Self {
            triggers: pre_handoff_lines(),
            current: None,
        }
    }
}

impl TriggerScript {
    /// Fire the highest newly-reached trigger, then age the shown line
    pub fn update(&mut self, score: u64, dt: f32) {
        let mut fired = None;
        for trigger in self.triggers.iter_mut() {
            if !trigger.shown && score >= trigger.score {
                trigger.shown = true;
                fired = Some(trigger.line.clone());
            }
        }
        if let Some(line) = fired {
            log::debug!("dialogue: {} says {:?}", line.speaker.name(), line.text);
            self.current = Some(ActiveLine {
                remaining: line.duration,
                line,
            });
            return;
        }

        if let Some(active) = &mut self.current {
            active.remaining -= dt;
            if active.remaining <= 0.0 {
                self.current = None;
            }
        }
    }

    /// Drop whatever is on screen (the script stops at the handoff)
    pub fn silence(&mut self) {
        self.current = None;
    }
}

/// Ordered lines played back after the handoff
#[derive(Debug, Clone)]
pub struct SequenceScript {
    pub lines: Vec<DialogueLine>,
    /// Index of the line on screen (or next to show)
    pub index: usize,
    pub remaining: f32,
    pub started: bool,
}

impl Default for SequenceScript {
    fn default() -> Self {
        Self {
            lines: post_handoff_lines(),
            index: 0,
            remaining: 0.0,
            started: false,
        }
    }
}

impl SequenceScript {
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.index = 0;
        self.remaining = self.lines.first().map(|l| l.duration).unwrap_or(0.0);
    }

    pub fn update(&mut self, dt: f32) {
        if !self.started || self.finished() {
            return;
        }
        self.remaining -= dt;
        while self.remaining <= 0.0 && !self.finished() {
            self.index += 1;
            match self.lines.get(self.index) {
                Some(next) => self.remaining += next.duration,
                None => self.remaining = 0.0,
            }
        }
    }

    pub fn finished(&self) -> bool {
        self.index >= self.lines.len()
    }

    /// Whether `speaker` still has a line on screen or yet to come
    pub fn speaks_later(&self, speaker: ActorKind) -> bool {
        self.lines
            .iter()
            .skip(self.index)
            .any(|line| line.speaker == speaker)
    }

    pub fn current(&self) -> Option<&DialogueLine> {
        if self.started {
            self.lines.get(self.index)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triggers_fire_once() {
        let mut script = TriggerScript::default();
        script.update(4, 1.0);
        assert!(script.current.is_none());

        script.update(5, 1.0);
        let shown = script.current.clone().unwrap();
        assert_eq!(shown.line.text, "Ooh, loose pages!");

        // Let it expire, then stay at the same score: no re-fire
        for _ in 0..200 {
            script.update(6, 1.0);
        }
        assert!(script.current.is_none());
        assert!(script.triggers[0].shown);
    }

    #[test]
    fn test_skipped_thresholds_show_latest() {
        let mut script = TriggerScript::default();
        script.update(65, 1.0);
        assert_eq!(script.current.as_ref().unwrap().line.text, "Faster... faster!");
        assert!(script.triggers.iter().take(3).all(|t| t.shown));
        assert!(!script.triggers[3].shown);
    }

    #[test]
    fn test_sequence_plays_in_order() {
        let mut script = SequenceScript::default();
        assert!(script.current().is_none());
        script.update(1000.0);
        assert!(script.current().is_none());

        script.start();
        assert_eq!(script.current().unwrap().speaker, ActorKind::Noodle);
        script.update(149.0);
        assert_eq!(script.index, 0);
        script.update(1.0);
        assert_eq!(script.index, 1);
        assert_eq!(script.current().unwrap().speaker, ActorKind::Pudding);

        script.update(140.0 + 160.0);
        assert!(script.finished());
        assert!(script.current().is_none());
    }

    #[test]
    fn test_speaks_later_tracks_remaining_lines() {
        let mut script = SequenceScript::default();
        assert!(script.speaks_later(ActorKind::Pudding));
        script.start();
        script.update(150.0);
        assert!(script.speaks_later(ActorKind::Pudding));
        script.update(140.0);
        assert!(!script.speaks_later(ActorKind::Pudding));
        assert!(script.speaks_later(ActorKind::Noodle));
        script.update(160.0);
        assert!(!script.speaks_later(ActorKind::Noodle));
    }

    #[test]
    fn test_sequence_start_is_idempotent() {
        let mut script = SequenceScript::default();
        script.start();
        script.update(150.0);
        script.start();
        assert_eq!(script.index, 1);
    }
}
