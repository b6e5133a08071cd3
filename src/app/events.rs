//! Events the engine sends to whatever presents the game

use crate::game::round::RoundSummary;
use crate::game::LetterBag;
use std::collections::VecDeque;

/// Why a submission was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Not a solution word
    Wrong,
    /// Already found this round
    Duplicate,
}

/// A player's place on the scoreboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub name: String,
    pub score: u32,
}

/// Notifications from the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A new round's letters are on the table
    LettersReady(LetterBag),
    WordAccepted {
        word: String,
        points: u32,
        bonus: bool,
    },
    WordRejected(RejectReason),
    /// The running countdown moved
    Tick(u32),
    /// It is now this player's turn
    TurnChanged(usize),
    RoundEnded(RoundSummary),
    /// Players ranked by cumulative score, best first
    ScoreboardReady(Vec<Standing>),
    /// The game is over; multiplayer games name a winner
    SessionEnded(Option<Standing>),
}

/// Receives engine events.
pub trait Presenter {
    fn notify(&mut self, event: GameEvent);
}

/// Queues events until the UI drains them.
#[derive(Debug, Default)]
pub struct EventLog {
    events: VecDeque<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued event, oldest first.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Presenter for EventLog {
    fn notify(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }
}
