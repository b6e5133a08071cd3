//! The countdown slot
//!
//! The game never has more than one running countdown: either the
//! single-player clock or the active player's turn clock. `TimerSlot` owns
//! that countdown. Starting a new one replaces (cancels) whatever was
//! running, and an expired countdown clears itself so later ticks are no-ops.
//!
//! Time only moves when the game loop calls `tick`.

use log::debug;

/// Identifies one started countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Countdown {
    id: TimerId,
    remaining: u32,
    paused: bool,
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No countdown is running
    Idle,
    /// The countdown is paused at this value
    Paused(u32),
    /// The countdown moved down to this value
    Running(u32),
    /// The countdown reached zero and was cleared
    Expired(TimerId),
}

/// Holds at most one countdown.
#[derive(Debug, Default)]
pub struct TimerSlot {
    next_id: u64,
    active: Option<Countdown>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a countdown from `budget`, cancelling any running one.
    pub fn start(&mut self, budget: u32) -> TimerId {
        if let Some(old) = self.cancel() {
            debug!("timer {:?} replaced before expiry", old);
        }
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.active = Some(Countdown {
            id,
            remaining: budget,
            paused: false,
        });
        id
    }

    /// Stop the running countdown, if any.
    pub fn cancel(&mut self) -> Option<TimerId> {
        self.active.take().map(|c| c.id)
    }

    /// Freeze the running countdown. It stays frozen until replaced.
    pub fn pause(&mut self) {
        if let Some(countdown) = &mut self.active {
            countdown.paused = true;
        }
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.active.as_ref().is_some_and(|c| c.paused)
    }

    #[cfg(test)]
    pub fn active_id(&self) -> Option<TimerId> {
        self.active.as_ref().map(|c| c.id)
    }

    /// Time left on the running countdown
    pub fn remaining(&self) -> Option<u32> {
        self.active.as_ref().map(|c| c.remaining)
    }

    /// Advance the running countdown by one unit.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(countdown) = &mut self.active else {
            return TickOutcome::Idle;
        };
        if countdown.paused {
            return TickOutcome::Paused(countdown.remaining);
        }
        countdown.remaining = countdown.remaining.saturating_sub(1);
        if countdown.remaining == 0 {
            let id = countdown.id;
            self.active = None;
            return TickOutcome::Expired(id);
        }
        TickOutcome::Running(countdown.remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down_and_expires_once() {
        let mut slot = TimerSlot::new();
        let id = slot.start(3);
        assert_eq!(slot.tick(), TickOutcome::Running(2));
        assert_eq!(slot.tick(), TickOutcome::Running(1));
        assert_eq!(slot.tick(), TickOutcome::Expired(id));
        assert_eq!(slot.tick(), TickOutcome::Idle);
        assert_eq!(slot.tick(), TickOutcome::Idle);
        assert!(!slot.is_running());
    }

    #[test]
    fn test_start_replaces_running_countdown() {
        let mut slot = TimerSlot::new();
        let first = slot.start(5);
        slot.tick();
        let second = slot.start(5);
        assert_ne!(first, second);
        assert_eq!(slot.active_id(), Some(second));
        assert_eq!(slot.remaining(), Some(5));
    }

    #[test]
    fn test_pause_freezes_until_replaced() {
        let mut slot = TimerSlot::new();
        slot.start(5);
        slot.tick();
        slot.pause();
        for _ in 0..10 {
            assert_eq!(slot.tick(), TickOutcome::Paused(4));
        }
        slot.start(5);
        assert!(!slot.is_paused());
        assert_eq!(slot.tick(), TickOutcome::Running(4));
    }

    #[test]
    fn test_cancel_stops_ticks() {
        let mut slot = TimerSlot::new();
        let id = slot.start(2);
        assert_eq!(slot.cancel(), Some(id));
        assert_eq!(slot.cancel(), None);
        assert_eq!(slot.tick(), TickOutcome::Idle);
    }

    #[test]
    fn test_zero_budget_expires_on_first_tick() {
        let mut slot = TimerSlot::new();
        let id = slot.start(0);
        assert_eq!(slot.tick(), TickOutcome::Expired(id));
    }
}
