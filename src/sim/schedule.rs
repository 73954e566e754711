//! Frame-keyed delayed events
//!
//! Delayed side effects are queued against the frame counter and drained
//! inside the tick, so they can never race the update. Each event records the
//! story phase it was scheduled in and is dropped if the phase has moved on.

use super::state::StoryPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledAction {
    /// The trailing character copies the lead's jump
    MimicJump,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledEvent {
    pub due_frame: f32,
    pub phase: StoryPhase,
    pub action: ScheduledAction,
}

#[derive(Debug, Clone, Default)]
pub struct Schedule {
    events: Vec<ScheduledEvent>,
}

impl Schedule {
    pub fn push(&mut self, due_frame: f32, phase: StoryPhase, action: ScheduledAction) {
        self.events.push(ScheduledEvent {
            due_frame,
            phase,
            action,
        });
    }

    /// Remove and return due events still valid in `phase`; stale ones are dropped
    pub fn drain_due(&mut self, frames: f32, phase: StoryPhase) -> Vec<ScheduledAction> {
        let mut due = Vec::new();
        self.events.retain(|event| {
            if event.due_frame > frames {
                return true;
            }
            if event.phase == phase {
                due.push(event.action);
            } else {
                log::debug!("dropping stale {:?} from {:?}", event.action, event.phase);
            }
            false
        });
        due
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_when_due() {
        let mut schedule = Schedule::default();
        schedule.push(10.0, StoryPhase::Transition, ScheduledAction::MimicJump);
        assert!(schedule.drain_due(9.5, StoryPhase::Transition).is_empty());
        assert_eq!(
            schedule.drain_due(10.0, StoryPhase::Transition),
            vec![ScheduledAction::MimicJump]
        );
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_stale_phase_is_dropped() {
        let mut schedule = Schedule::default();
        schedule.push(10.0, StoryPhase::Transition, ScheduledAction::MimicJump);
        assert!(schedule.drain_due(12.0, StoryPhase::Solo2).is_empty());
        assert!(schedule.is_empty());
    }
}
