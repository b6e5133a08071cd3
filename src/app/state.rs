//! The round and turn state machine
//!
//! `Engine` runs one session: it draws letters, solves the bag, referees
//! submissions and drives the countdown. It is single-threaded and only
//! moves when the caller feeds it input or ticks.
//!
//! ```text
//! Idle -> LetterGeneration -> Solving -> AwaitingInput <-> tick
//!      -> RoundEnd -> (Scoreboard -> next round | SessionEnd)
//! ```

use super::events::{GameEvent, Presenter, RejectReason};
use super::session::{Mode, Session};
use crate::config::GameConfig;
use crate::game::alphabet;
use crate::game::dictionary::Lexicon;
use crate::game::round::{Round, RoundSummary, Verdict};
use crate::game::timer::{TickOutcome, TimerSlot};
use crate::game::LetterSource;
use log::{debug, info};
use std::sync::Arc;

/// Where the engine is in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    LetterGeneration,
    Solving,
    AwaitingInput,
    RoundEnd,
    Scoreboard,
    SessionEnd,
}

/// Result of a word submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted {
        word: String,
        points: u32,
        bonus: bool,
    },
    Rejected(RejectReason),
    /// Nothing to judge: empty input, or not accepting words right now
    Ignored,
}

/// Runs one game session.
pub struct Engine<P: Presenter> {
    config: GameConfig,
    lexicon: Arc<Lexicon>,
    letters: Box<dyn LetterSource>,
    presenter: P,
    session: Session,
    round: Option<Round>,
    phase: Phase,
    timer: TimerSlot,
    /// Index of the player whose turn it is (multiplayer)
    active_player: usize,
    /// What the player is typing
    input: String,
}

impl<P: Presenter> Engine<P> {
    pub fn new(
        session: Session,
        config: GameConfig,
        lexicon: Arc<Lexicon>,
        letters: Box<dyn LetterSource>,
        presenter: P,
    ) -> Self {
        Self {
            config,
            lexicon,
            letters,
            presenter,
            session,
            round: None,
            phase: Phase::Idle,
            timer: TimerSlot::new(),
            active_player: 0,
            input: String::new(),
        }
    }

    /// Start the first round.
    pub fn start(&mut self) {
        if self.phase == Phase::Idle && self.session.current_round() == 0 {
            self.start_round();
        }
    }

    fn start_round(&mut self) {
        self.timer.cancel();
        let number = self.session.begin_round();

        self.phase = Phase::LetterGeneration;
        let bag = self.letters.draw();
        self.presenter.notify(GameEvent::LettersReady(bag.clone()));

        self.phase = Phase::Solving;
        let round = Round::new(number, bag, &self.lexicon);
        info!(
            "Round {}/{} started with {}: {} solution words, longest {}",
            number,
            self.session.total_rounds(),
            round.bag().as_string(),
            round.solution().len(),
            round.solution().max_len()
        );
        self.round = Some(round);

        self.phase = Phase::AwaitingInput;
        self.input.clear();
        match self.session.mode() {
            Mode::Single => {
                self.timer.start(self.config.solo_time);
                self.presenter.notify(GameEvent::Tick(self.config.solo_time));
            }
            Mode::Multiplayer => {
                self.active_player = 0;
                self.start_turn();
            }
        }
    }

    fn start_turn(&mut self) {
        self.input.clear();
        self.timer.start(self.config.turn_time);
        if let Some(player) = self.session.player(self.active_player) {
            debug!(
                "{}'s turn ({}/{})",
                player.name,
                player.turns_played + 1,
                self.session.turns_per_round()
            );
        }
        self.presenter.notify(GameEvent::TurnChanged(self.active_player));
        self.presenter.notify(GameEvent::Tick(self.config.turn_time));
    }

    /// Consume the active player's turn and hand over or end the round.
    fn end_turn(&mut self) {
        self.timer.cancel();
        self.session.consume_turn(self.active_player);
        if self.session.round_complete() {
            self.end_round();
            return;
        }
        self.active_player = (self.active_player + 1) % self.session.players().len();
        self.start_turn();
    }

    fn end_round(&mut self) {
        if self.phase != Phase::AwaitingInput {
            return;
        }
        self.timer.cancel();
        self.phase = Phase::RoundEnd;
        self.input.clear();
        if let Some(round) = &self.round {
            let summary = round.summary();
            info!(
                "Round {} ended: {}/{} words found",
                summary.round, summary.found_count, summary.total_count
            );
            self.presenter.notify(GameEvent::RoundEnded(summary));
        }
    }

    fn finish(&mut self) {
        self.timer.cancel();
        self.phase = Phase::SessionEnd;
        let winner = match self.session.mode() {
            Mode::Single => None,
            Mode::Multiplayer => self.session.winner(),
        };
        if let Some(w) = &winner {
            info!("{} wins with {} points", w.name, w.score);
        }
        self.presenter.notify(GameEvent::SessionEnded(winner));
    }

    /// Move on from the round reveal or the scoreboard.
    pub fn advance(&mut self) {
        match self.phase {
            Phase::RoundEnd => {
                if self.session.mode() == Mode::Multiplayer && self.session.has_rounds_left() {
                    self.phase = Phase::Scoreboard;
                    self.presenter
                        .notify(GameEvent::ScoreboardReady(self.session.standings()));
                } else {
                    self.finish();
                }
            }
            Phase::Scoreboard => self.start_round(),
            _ => {}
        }
    }

    /// Advance the running countdown by one unit.
    pub fn tick(&mut self) {
        if self.phase != Phase::AwaitingInput {
            return;
        }
        match self.timer.tick() {
            TickOutcome::Idle | TickOutcome::Paused(_) => {}
            TickOutcome::Running(remaining) => {
                self.presenter.notify(GameEvent::Tick(remaining));
            }
            TickOutcome::Expired(_) => {
                self.presenter.notify(GameEvent::Tick(0));
                match self.session.mode() {
                    Mode::Single => self.end_round(),
                    Mode::Multiplayer => {
                        debug!("turn timed out");
                        self.end_turn();
                    }
                }
            }
        }
    }

    /// Handle a typed character.
    ///
    /// In multiplayer, the first character of a turn freezes the turn clock.
    pub fn on_char(&mut self, c: char) {
        if self.phase != Phase::AwaitingInput {
            return;
        }
        let was_empty = self.input.is_empty();
        self.input.push(c);
        if was_empty && self.session.mode() == Mode::Multiplayer && !self.timer.is_paused() {
            self.timer.pause();
            debug!("turn clock paused");
        }
    }

    pub fn on_backspace(&mut self) {
        if self.phase != Phase::AwaitingInput {
            return;
        }
        self.input.pop();
    }

    /// Submit whatever is in the input buffer.
    pub fn submit(&mut self) -> SubmitOutcome {
        let raw = std::mem::take(&mut self.input);
        self.submit_word(&raw)
    }

    /// Judge a word.
    ///
    /// Single-player rejections change nothing. In multiplayer every judged
    /// submission, right or wrong, ends the active player's turn.
    pub fn submit_word(&mut self, raw: &str) -> SubmitOutcome {
        if self.phase != Phase::AwaitingInput {
            return SubmitOutcome::Ignored;
        }
        let word = alphabet::normalize(raw);
        if word.is_empty() {
            return SubmitOutcome::Ignored;
        }
        let Some(round) = self.round.as_mut() else {
            return SubmitOutcome::Ignored;
        };
        self.input.clear();

        let outcome = match round.judge(&word) {
            Verdict::Accepted(found) => {
                let credited = match self.session.mode() {
                    Mode::Single => None,
                    Mode::Multiplayer => Some(self.active_player),
                };
                self.session.award(credited, found.points);
                if found.bonus {
                    info!("Longest word bonus for {}", found.word);
                }
                self.presenter.notify(GameEvent::WordAccepted {
                    word: found.word.clone(),
                    points: found.points,
                    bonus: found.bonus,
                });
                SubmitOutcome::Accepted {
                    word: found.word,
                    points: found.points,
                    bonus: found.bonus,
                }
            }
            Verdict::Wrong => {
                self.presenter
                    .notify(GameEvent::WordRejected(RejectReason::Wrong));
                SubmitOutcome::Rejected(RejectReason::Wrong)
            }
            Verdict::Duplicate => {
                self.presenter
                    .notify(GameEvent::WordRejected(RejectReason::Duplicate));
                SubmitOutcome::Rejected(RejectReason::Duplicate)
            }
        };

        if self.session.mode() == Mode::Multiplayer {
            self.end_turn();
        }
        outcome
    }

    /// Stop the clock for good (leaving the game).
    pub fn shutdown(&mut self) {
        if let Some(id) = self.timer.cancel() {
            debug!("cancelled timer {:?} on shutdown", id);
        }
        self.input.clear();
        self.phase = Phase::Idle;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> Mode {
        self.session.mode()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// The reveal for the round that just ended
    pub fn summary(&self) -> Option<RoundSummary> {
        match self.phase {
            Phase::RoundEnd | Phase::Scoreboard | Phase::SessionEnd => {
                self.round.as_ref().map(Round::summary)
            }
            _ => None,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Whose turn it is, in multiplayer while a round is live
    pub fn active_player(&self) -> Option<usize> {
        match (self.session.mode(), self.phase) {
            (Mode::Multiplayer, Phase::AwaitingInput) => Some(self.active_player),
            _ => None,
        }
    }

    /// Time left on the running clock
    pub fn remaining(&self) -> Option<u32> {
        self.timer.remaining()
    }

    pub fn is_clock_paused(&self) -> bool {
        self.timer.is_paused()
    }

    #[cfg(test)]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::events::{EventLog, Standing};
    use crate::game::{FixedLetters, LetterBag};

    const WORDS: &str = "kalem\nelma\nlake\nkelt\nkalemtır\nmasa\nkale\n";

    fn bag() -> LetterBag {
        LetterBag::from_letters(&['a', 'e', 'ı', 'n', 'r', 'l', 't', 'k', 'm', 'u'])
    }

    fn engine(session: Session) -> Engine<EventLog> {
        let mut engine = Engine::new(
            session,
            GameConfig::default(),
            Arc::new(Lexicon::from_text(WORDS)),
            Box::new(FixedLetters::new(vec![bag()])),
            EventLog::new(),
        );
        engine.start();
        engine
    }

    fn solo() -> Engine<EventLog> {
        engine(Session::single())
    }

    fn duo(rounds: u32) -> Engine<EventLog> {
        engine(Session::multiplayer(&["Ayşe", "Mehmet"], rounds, &GameConfig::default()).unwrap())
    }

    fn count_round_ends(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::RoundEnded(_)))
            .count()
    }

    #[test]
    fn test_start_emits_letters_and_clock() {
        let mut engine = solo();
        let events = engine.presenter_mut().drain();
        assert_eq!(events[0], GameEvent::LettersReady(bag()));
        assert_eq!(events[1], GameEvent::Tick(100));
        assert_eq!(engine.phase(), Phase::AwaitingInput);
        assert_eq!(engine.remaining(), Some(100));
    }

    #[test]
    fn test_solo_accepts_and_scores() {
        let mut engine = solo();
        assert_eq!(
            engine.submit_word("ELMA"),
            SubmitOutcome::Accepted {
                word: "elma".to_string(),
                points: 40,
                bonus: false
            }
        );
        assert_eq!(engine.session().solo_score(), 40);
    }

    #[test]
    fn test_solo_duplicate_scored_once() {
        let mut engine = solo();
        engine.presenter_mut().drain();
        assert!(matches!(engine.submit_word("kalem"), SubmitOutcome::Accepted { .. }));
        assert_eq!(
            engine.submit_word("kalem"),
            SubmitOutcome::Rejected(RejectReason::Duplicate)
        );
        let accepted = engine
            .presenter_mut()
            .drain()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::WordAccepted { .. }))
            .count();
        assert_eq!(accepted, 1);
        assert_eq!(engine.round().unwrap().found_words().len(), 1);
        assert_eq!(engine.session().solo_score(), 50);
    }

    #[test]
    fn test_solo_longest_word_bonus() {
        let mut engine = solo();
        assert_eq!(
            engine.submit_word("kalemtır"),
            SubmitOutcome::Accepted {
                word: "kalemtır".to_string(),
                points: 160,
                bonus: true
            }
        );
        assert_eq!(
            engine.submit_word("kalemtır"),
            SubmitOutcome::Rejected(RejectReason::Duplicate)
        );
        assert_eq!(engine.session().solo_score(), 160);
    }

    #[test]
    fn test_solo_wrong_word_keeps_clock() {
        let mut engine = solo();
        engine.tick();
        engine.on_char('m');
        engine.on_char('a');
        assert_eq!(engine.submit(), SubmitOutcome::Rejected(RejectReason::Wrong));
        assert_eq!(engine.input(), "");
        assert_eq!(engine.remaining(), Some(99));
        assert!(!engine.is_clock_paused());
        assert_eq!(engine.phase(), Phase::AwaitingInput);
    }

    #[test]
    fn test_empty_submission_ignored() {
        let mut engine = solo();
        assert_eq!(engine.submit_word("   "), SubmitOutcome::Ignored);
        assert_eq!(engine.submit(), SubmitOutcome::Ignored);
    }

    #[test]
    fn test_solo_clock_ends_round_once() {
        let mut engine = solo();
        engine.presenter_mut().drain();
        for _ in 0..99 {
            engine.tick();
        }
        assert_eq!(engine.remaining(), Some(1));
        assert_eq!(engine.phase(), Phase::AwaitingInput);

        engine.tick();
        assert_eq!(engine.phase(), Phase::RoundEnd);
        for _ in 0..5 {
            engine.tick();
        }
        let events = engine.presenter_mut().drain();
        assert_eq!(count_round_ends(&events), 1);
        assert!(matches!(events.last(), Some(GameEvent::RoundEnded(_))));
        assert_eq!(events[events.len() - 2], GameEvent::Tick(0));
        assert_eq!(engine.submit_word("elma"), SubmitOutcome::Ignored);
    }

    #[test]
    fn test_solo_session_ends_without_winner() {
        let mut engine = solo();
        for _ in 0..100 {
            engine.tick();
        }
        engine.advance();
        assert_eq!(engine.phase(), Phase::SessionEnd);
        let events = engine.presenter_mut().drain();
        assert_eq!(events.last(), Some(&GameEvent::SessionEnded(None)));
    }

    #[test]
    fn test_round_end_reveals_solution() {
        let mut engine = solo();
        engine.submit_word("kale");
        for _ in 0..100 {
            engine.tick();
        }
        let summary = engine.summary().unwrap();
        assert_eq!(summary.total_count, 6);
        assert_eq!(summary.found_count, 1);
        assert!(summary.words().any(|w| w.word == "kale" && w.found));
        assert!(summary.words().any(|w| w.word == "kalem" && !w.found));
    }

    #[test]
    fn test_turn_clock_pauses_on_first_key() {
        let mut engine = duo(1);
        engine.tick();
        assert_eq!(engine.remaining(), Some(4));
        engine.on_char('k');
        assert!(engine.is_clock_paused());
        engine.presenter_mut().drain();
        for _ in 0..20 {
            engine.tick();
        }
        assert_eq!(engine.remaining(), Some(4));
        // a held clock reports nothing
        assert!(engine.presenter().is_empty());
        assert_eq!(engine.active_player(), Some(0));

        // emptying the buffer does not restart the clock
        engine.on_backspace();
        engine.tick();
        assert_eq!(engine.remaining(), Some(4));
    }

    #[test]
    fn test_turn_timeout_rotates_player() {
        let mut engine = duo(1);
        engine.presenter_mut().drain();
        for _ in 0..5 {
            engine.tick();
        }
        assert_eq!(engine.active_player(), Some(1));
        assert_eq!(engine.remaining(), Some(5));
        assert_eq!(engine.session().players()[0].turns_played, 1);
        let events = engine.presenter_mut().drain();
        assert!(events.contains(&GameEvent::TurnChanged(1)));
    }

    #[test]
    fn test_wrong_and_duplicate_consume_turn() {
        let mut engine = duo(1);
        assert_eq!(
            engine.submit_word("masa"),
            SubmitOutcome::Rejected(RejectReason::Wrong)
        );
        assert_eq!(engine.active_player(), Some(1));
        assert!(matches!(engine.submit_word("elma"), SubmitOutcome::Accepted { .. }));
        assert_eq!(engine.active_player(), Some(0));
        assert_eq!(
            engine.submit_word("elma"),
            SubmitOutcome::Rejected(RejectReason::Duplicate)
        );
        assert_eq!(engine.active_player(), Some(1));

        let players = engine.session().players();
        assert_eq!(players[0].score, 0);
        assert_eq!(players[1].score, 40);
        assert_eq!(engine.session().turns_elapsed(), 3);
    }

    #[test]
    fn test_submission_restarts_unpaused_clock() {
        let mut engine = duo(1);
        engine.on_char('x');
        assert!(engine.is_clock_paused());
        engine.submit();
        assert!(!engine.is_clock_paused());
        assert_eq!(engine.remaining(), Some(5));
    }

    #[test]
    fn test_round_ends_after_all_turns() {
        let mut engine = duo(2);
        let turns = 2 * engine.session().turns_per_round();
        for i in 0..turns {
            assert_eq!(engine.phase(), Phase::AwaitingInput, "turn {}", i);
            if i % 2 == 0 {
                engine.submit_word("zzzz");
            } else {
                for _ in 0..5 {
                    engine.tick();
                }
            }
        }
        assert_eq!(engine.phase(), Phase::RoundEnd);
        assert_eq!(engine.session().turns_elapsed(), turns);
        assert_eq!(count_round_ends(&engine.presenter_mut().drain()), 1);
        assert!(!engine.timer.is_running());
    }

    #[test]
    fn test_full_multiplayer_session() {
        let mut engine = duo(3);
        for round in 1..=3 {
            assert_eq!(engine.session().current_round(), round);
            // Mehmet finds a word each round, Ayşe always misses
            let mut mehmet_words = ["kalem", "elma", "kale"].into_iter();
            for turn in 0..10 {
                if turn % 2 == 1 && turn < 6 {
                    let word = mehmet_words.next().unwrap();
                    assert!(matches!(
                        engine.submit_word(word),
                        SubmitOutcome::Accepted { .. }
                    ));
                } else {
                    engine.submit_word("yanlış");
                }
            }
            assert_eq!(engine.phase(), Phase::RoundEnd);
            engine.presenter_mut().drain();
            engine.advance();

            let events = engine.presenter_mut().drain();
            if round < 3 {
                assert_eq!(engine.phase(), Phase::Scoreboard);
                assert_eq!(
                    events,
                    vec![GameEvent::ScoreboardReady(vec![
                        Standing {
                            name: "Mehmet".to_string(),
                            score: 130 * round,
                        },
                        Standing {
                            name: "Ayşe".to_string(),
                            score: 0,
                        },
                    ])]
                );
                engine.advance();
                assert_eq!(engine.phase(), Phase::AwaitingInput);
                assert_eq!(engine.active_player(), Some(0));
            } else {
                assert_eq!(engine.phase(), Phase::SessionEnd);
                assert_eq!(
                    events,
                    vec![GameEvent::SessionEnded(Some(Standing {
                        name: "Mehmet".to_string(),
                        score: 390,
                    }))]
                );
            }
        }
    }

    #[test]
    fn test_shutdown_cancels_clock() {
        let mut engine = duo(1);
        engine.shutdown();
        engine.presenter_mut().drain();
        for _ in 0..10 {
            engine.tick();
        }
        assert!(engine.presenter().is_empty());
        assert_eq!(engine.remaining(), None);
        assert_eq!(engine.submit_word("elma"), SubmitOutcome::Ignored);
    }

    #[test]
    fn test_empty_solution_round_is_playable() {
        let mut engine = Engine::new(
            Session::single(),
            GameConfig::default(),
            Arc::new(Lexicon::from_text("zürafa\n")),
            Box::new(FixedLetters::new(vec![bag()])),
            EventLog::new(),
        );
        engine.start();
        assert_eq!(
            engine.submit_word("zürafa"),
            SubmitOutcome::Rejected(RejectReason::Wrong)
        );
        for _ in 0..100 {
            engine.tick();
        }
        assert_eq!(engine.summary().map(|s| s.total_count), Some(0));
    }
}
