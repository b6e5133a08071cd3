//! Application screen state management
//!
//! Handles transitions between the screens:
//! - Main menu
//! - Multiplayer setup (names and round count)
//! - Playing (single or multiplayer), including the round reveal,
//!   scoreboard and final results

use super::events::{EventLog, GameEvent, RejectReason};
use super::session::Session;
use super::state::{Engine, Phase};
use crate::config::{GameConfig, DEFAULT_ROUNDS, MAX_NAME_LEN, MAX_PLAYERS, MAX_ROUNDS};
use crate::game::alphabet;
use crate::game::dictionary::Lexicon;
use crate::game::WeightedLetters;
use crate::lookup::{DefinitionLookup, LookupResult};
use log::{debug, info};
use std::sync::Arc;

/// Menu option on the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    SinglePlayer,
    Multiplayer,
    Quit,
}

impl MenuOption {
    /// Get all menu options in order
    pub fn all() -> &'static [MenuOption] {
        &[
            MenuOption::SinglePlayer,
            MenuOption::Multiplayer,
            MenuOption::Quit,
        ]
    }

    /// Get the display label for this option
    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::SinglePlayer => "Single Player",
            MenuOption::Multiplayer => "Multiplayer",
            MenuOption::Quit => "Quit",
        }
    }
}

/// The multiplayer setup form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupForm {
    /// One slot per possible player; blank slots are skipped
    pub names: Vec<String>,
    /// Focused field: a name slot, or `MAX_PLAYERS` for the round selector
    pub focus: usize,
    pub rounds: u32,
    pub error: Option<String>,
}

impl Default for SetupForm {
    fn default() -> Self {
        Self::new()
    }
}

impl SetupForm {
    pub fn new() -> Self {
        Self {
            names: vec![String::new(); MAX_PLAYERS],
            focus: 0,
            rounds: DEFAULT_ROUNDS,
            error: None,
        }
    }

    pub fn rounds_focused(&self) -> bool {
        self.focus == MAX_PLAYERS
    }

    fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % (MAX_PLAYERS + 1);
    }

    fn focus_prev(&mut self) {
        self.focus = (self.focus + MAX_PLAYERS) % (MAX_PLAYERS + 1);
    }

    fn type_char(&mut self, c: char) {
        if let Some(name) = self.names.get_mut(self.focus) {
            if name.chars().count() < MAX_NAME_LEN {
                name.push(c);
            }
        }
    }

    fn backspace(&mut self) {
        if let Some(name) = self.names.get_mut(self.focus) {
            name.pop();
        }
    }

    fn adjust_rounds(&mut self, up: bool) {
        if !self.rounds_focused() {
            return;
        }
        self.rounds = if up {
            (self.rounds + 1).min(MAX_ROUNDS)
        } else {
            self.rounds.saturating_sub(1).max(1)
        };
    }
}

/// The definition panel on the round reveal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition {
    Loading(String),
    Ready { word: String, result: LookupResult },
}

/// The current application screen
pub enum Screen {
    /// Main menu
    Menu { selected: usize },
    /// Entering player names before a multiplayer game
    Setup(SetupForm),
    /// A game in progress
    Playing {
        engine: Engine<EventLog>,
        /// Message about the last submission
        feedback: String,
        /// Highlighted word on the round reveal
        selected_word: usize,
        definition: Option<Definition>,
    },
}

/// Main application coordinator
pub struct AppCoordinator {
    /// Current screen
    pub screen: Screen,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Shown on the menu, e.g. when the word list fell back to the built-in one
    pub notice: Option<String>,
    config: GameConfig,
    lexicon: Arc<Lexicon>,
    lookup: Option<DefinitionLookup>,
}

impl AppCoordinator {
    /// Create a new app coordinator starting at the menu
    pub fn new(lexicon: Arc<Lexicon>, config: GameConfig, notice: Option<String>) -> Self {
        Self {
            screen: Screen::Menu { selected: 0 },
            should_quit: false,
            notice,
            config,
            lexicon,
            lookup: None,
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        if let Screen::Playing { engine, .. } = &mut self.screen {
            engine.shutdown();
        }
        self.should_quit = true;
    }

    /// Go back to the main menu, abandoning any game in progress
    pub fn go_to_menu(&mut self) {
        if let Screen::Playing { engine, .. } = &mut self.screen {
            engine.shutdown();
            info!("Left the game");
        }
        self.screen = Screen::Menu { selected: 0 };
    }

    fn start_game(&mut self, session: Session) {
        let mut engine = Engine::new(
            session,
            self.config.clone(),
            Arc::clone(&self.lexicon),
            Box::new(WeightedLetters::from_seed(self.config.seed)),
            EventLog::new(),
        );
        engine.start();
        self.screen = Screen::Playing {
            engine,
            feedback: String::new(),
            selected_word: 0,
            definition: None,
        };
    }

    fn start_multiplayer(&mut self) {
        let Screen::Setup(form) = &mut self.screen else {
            return;
        };
        match Session::multiplayer(form.names.as_slice(), form.rounds, &self.config) {
            Ok(session) => {
                info!(
                    "Starting {} rounds with {} players",
                    session.total_rounds(),
                    session.players().len()
                );
                self.start_game(session);
            }
            Err(e) => {
                debug!("Setup rejected: {}", e);
                form.error = Some(e.to_string());
            }
        }
    }

    /// Handle menu selection (Enter)
    fn menu_select(&mut self, selected: usize) {
        match MenuOption::all()[selected] {
            MenuOption::SinglePlayer => self.start_game(Session::single()),
            MenuOption::Multiplayer => self.screen = Screen::Setup(SetupForm::new()),
            MenuOption::Quit => self.quit(),
        }
    }

    /// Up arrow
    pub fn on_up(&mut self) {
        match &mut self.screen {
            Screen::Menu { selected } => *selected = selected.saturating_sub(1),
            Screen::Setup(form) => form.focus_prev(),
            Screen::Playing {
                selected_word,
                definition,
                ..
            } => {
                *selected_word = selected_word.saturating_sub(1);
                *definition = None;
            }
        }
    }

    /// Down arrow
    pub fn on_down(&mut self) {
        match &mut self.screen {
            Screen::Menu { selected } => {
                if *selected < MenuOption::all().len() - 1 {
                    *selected += 1;
                }
            }
            Screen::Setup(form) => form.focus_next(),
            Screen::Playing {
                engine,
                selected_word,
                definition,
                ..
            } => {
                let count = engine.summary().map_or(0, |s| s.total_count);
                if *selected_word + 1 < count {
                    *selected_word += 1;
                    *definition = None;
                }
            }
        }
    }

    /// Left or right arrow: change the round count on the setup screen
    pub fn on_horizontal(&mut self, right: bool) {
        if let Screen::Setup(form) = &mut self.screen {
            form.adjust_rounds(right);
        }
    }

    /// Tab: next setup field, or look up the highlighted word on the reveal
    pub fn on_tab(&mut self) {
        match &mut self.screen {
            Screen::Setup(form) => form.focus_next(),
            Screen::Playing { .. } => self.request_definition(),
            Screen::Menu { .. } => {}
        }
    }

    pub fn on_char(&mut self, c: char) {
        match &mut self.screen {
            Screen::Setup(form) => form.type_char(c),
            Screen::Playing { engine, .. } => {
                if alphabet::is_typeable(c) {
                    engine.on_char(c);
                }
            }
            Screen::Menu { .. } => {}
        }
    }

    pub fn on_backspace(&mut self) {
        match &mut self.screen {
            Screen::Setup(form) => form.backspace(),
            Screen::Playing { engine, .. } => engine.on_backspace(),
            Screen::Menu { .. } => {}
        }
    }

    /// Enter
    pub fn on_enter(&mut self) {
        match &mut self.screen {
            Screen::Menu { selected } => {
                let selected = *selected;
                self.menu_select(selected);
            }
            Screen::Setup(_) => self.start_multiplayer(),
            Screen::Playing {
                engine,
                selected_word,
                definition,
                ..
            } => match engine.phase() {
                Phase::AwaitingInput => {
                    engine.submit();
                }
                Phase::RoundEnd | Phase::Scoreboard => {
                    engine.advance();
                    *selected_word = 0;
                    *definition = None;
                }
                Phase::SessionEnd | Phase::Idle => self.go_to_menu(),
                Phase::LetterGeneration | Phase::Solving => {}
            },
        }
        self.poll();
    }

    /// Esc: close the definition panel, or back out one screen
    pub fn on_escape(&mut self) {
        match &mut self.screen {
            Screen::Menu { .. } => self.quit(),
            Screen::Playing { definition, .. } if definition.is_some() => *definition = None,
            _ => self.go_to_menu(),
        }
    }

    /// Advance the game clock by one tick
    pub fn tick(&mut self) {
        if let Screen::Playing { engine, .. } = &mut self.screen {
            engine.tick();
        }
        self.poll();
    }

    fn request_definition(&mut self) {
        let Screen::Playing {
            engine,
            selected_word,
            definition,
            ..
        } = &mut self.screen
        else {
            return;
        };
        if engine.phase() != Phase::RoundEnd {
            return;
        }
        let Some(word) = engine
            .summary()
            .and_then(|s| s.words().nth(*selected_word).map(|w| w.word.clone()))
        else {
            return;
        };
        self.lookup
            .get_or_insert_with(DefinitionLookup::spawn)
            .request(&word);
        *definition = Some(Definition::Loading(word));
    }

    /// Pick up engine events and finished lookups (call regularly)
    pub fn poll(&mut self) {
        let Screen::Playing {
            engine,
            feedback,
            definition,
            ..
        } = &mut self.screen
        else {
            return;
        };

        for event in engine.presenter_mut().drain() {
            if let Some(text) = describe(&event) {
                *feedback = text;
            }
        }

        if let Some(lookup) = &self.lookup {
            while let Some((word, result)) = lookup.poll() {
                if matches!(definition, Some(Definition::Loading(w)) if *w == word) {
                    *definition = Some(Definition::Ready { word, result });
                }
            }
        }
    }
}

/// Feedback line text for an engine event
fn describe(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::WordAccepted {
            word,
            points,
            bonus: true,
        } => Some(format!(
            "Correct! +{} {} (longest word, double points)",
            points,
            alphabet::to_display_upper(word)
        )),
        GameEvent::WordAccepted { word, points, .. } => Some(format!(
            "Correct! +{} {}",
            points,
            alphabet::to_display_upper(word)
        )),
        GameEvent::WordRejected(RejectReason::Wrong) => Some("Not a valid word".to_string()),
        GameEvent::WordRejected(RejectReason::Duplicate) => Some("Already found".to_string()),
        GameEvent::LettersReady(_) | GameEvent::RoundEnded(_) => Some(String::new()),
        GameEvent::Tick(_)
        | GameEvent::TurnChanged(_)
        | GameEvent::ScoreboardReady(_)
        | GameEvent::SessionEnded(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::session::Mode;

    fn coordinator() -> AppCoordinator {
        let config = GameConfig {
            seed: Some(7),
            ..GameConfig::default()
        };
        AppCoordinator::new(
            Arc::new(Lexicon::from_text("kalem\nelma\nkale\n")),
            config,
            None,
        )
    }

    fn setup_with(names: &[&str]) -> AppCoordinator {
        let mut app = coordinator();
        app.on_down();
        app.on_enter();
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                app.on_down();
            }
            for c in name.chars() {
                app.on_char(c);
            }
        }
        app
    }

    #[test]
    fn test_menu_navigation_bounds() {
        let mut app = coordinator();
        app.on_up();
        assert!(matches!(app.screen, Screen::Menu { selected: 0 }));
        for _ in 0..10 {
            app.on_down();
        }
        assert!(matches!(app.screen, Screen::Menu { selected: 2 }));
        app.on_enter();
        assert!(app.should_quit);
    }

    #[test]
    fn test_single_player_starts_running_game() {
        let mut app = coordinator();
        app.on_enter();
        match &app.screen {
            Screen::Playing { engine, .. } => {
                assert_eq!(engine.mode(), Mode::Single);
                assert_eq!(engine.phase(), Phase::AwaitingInput);
                assert_eq!(engine.remaining(), Some(100));
            }
            _ => panic!("expected a game"),
        }
    }

    #[test]
    fn test_wrong_word_feedback() {
        let mut app = coordinator();
        app.on_enter();
        for c in "zzzz".chars() {
            app.on_char(c);
        }
        app.on_enter();
        match &app.screen {
            Screen::Playing {
                engine, feedback, ..
            } => {
                assert_eq!(feedback, "Not a valid word");
                assert_eq!(engine.input(), "");
            }
            _ => panic!("expected a game"),
        }
    }

    #[test]
    fn test_non_letters_not_typed() {
        let mut app = coordinator();
        app.on_enter();
        app.on_char('3');
        app.on_char('ş');
        app.on_char('Ç');
        match &app.screen {
            Screen::Playing { engine, .. } => assert_eq!(engine.input(), "şÇ"),
            _ => panic!("expected a game"),
        }
    }

    #[test]
    fn test_setup_rejects_single_player() {
        let mut app = setup_with(&["Ayşe"]);
        app.on_enter();
        match &app.screen {
            Screen::Setup(form) => {
                assert!(form.error.as_deref().unwrap().contains("at least 2"));
            }
            _ => panic!("expected to stay on setup"),
        }
    }

    #[test]
    fn test_setup_rejects_duplicates() {
        let mut app = setup_with(&["Ali", "ALI"]);
        app.on_enter();
        assert!(matches!(&app.screen, Screen::Setup(form) if form.error.is_some()));
    }

    #[test]
    fn test_setup_starts_multiplayer() {
        let mut app = setup_with(&["Ayşe", "Mehmet"]);
        // jump to the round selector and pick 5 rounds
        for _ in 0..4 {
            app.on_down();
        }
        app.on_horizontal(true);
        app.on_horizontal(true);
        app.on_enter();
        match &app.screen {
            Screen::Playing { engine, .. } => {
                assert_eq!(engine.mode(), Mode::Multiplayer);
                assert_eq!(engine.session().total_rounds(), 5);
                assert_eq!(engine.active_player(), Some(0));
                assert_eq!(engine.remaining(), Some(5));
            }
            _ => panic!("expected a game"),
        }
    }

    #[test]
    fn test_round_selector_clamped() {
        let mut form = SetupForm::new();
        form.adjust_rounds(true);
        assert_eq!(form.rounds, DEFAULT_ROUNDS);
        form.focus = MAX_PLAYERS;
        for _ in 0..20 {
            form.adjust_rounds(true);
        }
        assert_eq!(form.rounds, MAX_ROUNDS);
        for _ in 0..20 {
            form.adjust_rounds(false);
        }
        assert_eq!(form.rounds, 1);
    }

    #[test]
    fn test_name_length_capped_while_typing() {
        let mut form = SetupForm::new();
        for c in "abcdefghijklmnopqrst".chars() {
            form.type_char(c);
        }
        assert_eq!(form.names[0].chars().count(), MAX_NAME_LEN);
    }

    #[test]
    fn test_escape_leaves_game() {
        let mut app = coordinator();
        app.on_enter();
        app.on_escape();
        assert!(matches!(app.screen, Screen::Menu { selected: 0 }));
        app.tick();
        assert!(!app.should_quit);
        app.on_escape();
        assert!(app.should_quit);
    }

    #[test]
    fn test_solo_game_runs_to_results() {
        let mut app = coordinator();
        app.on_enter();
        for _ in 0..100 {
            app.tick();
        }
        match &app.screen {
            Screen::Playing { engine, .. } => assert_eq!(engine.phase(), Phase::RoundEnd),
            _ => panic!("expected a game"),
        }
        app.on_enter();
        match &app.screen {
            Screen::Playing { engine, .. } => assert_eq!(engine.phase(), Phase::SessionEnd),
            _ => panic!("expected a game"),
        }
        app.on_enter();
        assert!(matches!(app.screen, Screen::Menu { .. }));
    }
}
