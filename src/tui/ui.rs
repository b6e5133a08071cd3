//! UI rendering using ratatui
//!
//! Supports multiple screens:
//! - Menu: Main menu with options
//! - Setup: Player names and round count for multiplayer
//! - Playing: Letters, timer and input while a round runs
//! - Round reveal, scoreboard and final results

use crate::app::events::Standing;
use crate::app::screen::{AppCoordinator, Definition, MenuOption, Screen, SetupForm};
use crate::app::session::Mode;
use crate::app::state::{Engine, Phase};
use crate::app::EventLog;
use crate::config::MAX_PLAYERS;
use crate::game::alphabet;
use crate::game::round::RoundSummary;
use crate::lookup::LookupResult;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

/// Render the appropriate screen based on app state
pub fn render(frame: &mut Frame, coordinator: &AppCoordinator) {
    match &coordinator.screen {
        Screen::Menu { selected } => {
            render_menu(frame, *selected, coordinator.notice.as_deref());
        }
        Screen::Setup(form) => render_setup(frame, form),
        Screen::Playing {
            engine,
            feedback,
            selected_word,
            definition,
        } => render_game(frame, engine, feedback, *selected_word, definition.as_ref()),
    }
}

/// Render the main menu
fn render_menu(frame: &mut Frame, selected: usize, notice: Option<&str>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Logo
            Constraint::Length(2), // Notice
            Constraint::Min(5), // Menu options
            Constraint::Length(2), // Footer
        ])
        .margin(2)
        .split(frame.area());

    let logo = r#"
 _  __    _ _
| |/ /___| (_)_ __ ___   ___
| ' // _ \ | | '_ ` _ \ / _ \
| . \  __/ | | | | | | |  __/
|_|\_\___|_|_|_| |_| |_|\___|
"#;
    let logo_widget = Paragraph::new(logo)
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Center);
    frame.render_widget(logo_widget, layout[0]);

    if let Some(notice) = notice {
        let notice_widget = Paragraph::new(notice)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        frame.render_widget(notice_widget, layout[1]);
    }

    let items: Vec<ListItem> = MenuOption::all()
        .iter()
        .enumerate()
        .map(|(i, opt)| {
            let style = if i == selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };
            let prefix = if i == selected { "> " } else { "  " };
            ListItem::new(format!("{}{}", prefix, opt.label())).style(style)
        })
        .collect();
    frame.render_widget(List::new(items), layout[2]);

    render_footer(frame, layout[3], "↑↓ Navigate  Enter Select  Esc Quit");
}

/// Render the multiplayer setup form
fn render_setup(frame: &mut Frame, form: &SetupForm) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(MAX_PLAYERS as u16 + 2), // Names
            Constraint::Length(3), // Rounds
            Constraint::Length(2), // Error
            Constraint::Min(0),
            Constraint::Length(2), // Footer
        ])
        .margin(1)
        .split(frame.area());

    let header = Paragraph::new("Players")
        .style(Style::default().fg(Color::Cyan).bold())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, layout[0]);

    let items: Vec<ListItem> = form
        .names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let focused = i == form.focus;
            let cursor = if focused { "_" } else { "" };
            let style = if focused {
                Style::default().fg(Color::Cyan).bold()
            } else if name.is_empty() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(format!("  Player {}: {}{}", i + 1, name, cursor)).style(style)
        })
        .collect();
    let names = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(names, layout[1]);

    let rounds_style = if form.rounds_focused() {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::White)
    };
    let rounds = Paragraph::new(format!("Rounds: < {} >", form.rounds))
        .style(rounds_style)
        .alignment(Alignment::Center);
    frame.render_widget(rounds, layout[2]);

    if let Some(error) = &form.error {
        let error = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(error, layout[3]);
    }

    render_footer(
        frame,
        layout[5],
        "↑↓ Field  ←→ Rounds  Enter Start  Esc Back",
    );
}

/// Render the in-game screen
fn render_game(
    frame: &mut Frame,
    engine: &Engine<EventLog>,
    feedback: &str,
    selected_word: usize,
    definition: Option<&Definition>,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with letters, timer
            Constraint::Min(0), // Main content area
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    render_header(frame, layout[0], engine);

    match engine.phase() {
        Phase::RoundEnd => {
            if let Some(summary) = engine.summary() {
                render_reveal(frame, layout[1], &summary, selected_word, definition);
            }
            let next = match (engine.mode(), engine.session().has_rounds_left()) {
                (Mode::Multiplayer, true) => "Enter Scoreboard",
                _ => "Enter Results",
            };
            render_footer(
                frame,
                layout[2],
                &format!("↑↓ Word  Tab Definition  {}  Esc Menu", next),
            );
        }
        Phase::Scoreboard => {
            render_standings(
                frame,
                layout[1],
                &format!(
                    "Standings after round {}/{}",
                    engine.session().current_round(),
                    engine.session().total_rounds()
                ),
                &engine.session().standings(),
            );
            render_footer(frame, layout[2], "Enter Next round  Esc Menu");
        }
        Phase::SessionEnd => {
            render_results(frame, layout[1], engine);
            render_footer(frame, layout[2], "Enter Menu");
        }
        _ => {
            render_main(frame, layout[1], engine, feedback);
            render_footer(frame, layout[2], "Enter Submit  Esc Menu");
        }
    }
}

/// Render the header: title, letter tiles, timer
fn render_header(frame: &mut Frame, area: Rect, engine: &Engine<EventLog>) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(14), // Title
            Constraint::Min(20), // Letters
            Constraint::Length(10), // Timer
        ])
        .split(inner);

    let title = match engine.mode() {
        Mode::Single => "KELİME".to_string(),
        Mode::Multiplayer => format!(
            "Round {}/{}",
            engine.session().current_round(),
            engine.session().total_rounds()
        ),
    };
    let title = Paragraph::new(title)
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Left);
    frame.render_widget(title, header_layout[0]);

    let letters = engine.round().map(|r| r.bag().letters()).unwrap_or_default();
    let letters = Paragraph::new(format_letter_tiles(letters))
        .style(Style::default().fg(Color::Cyan).bold())
        .alignment(Alignment::Center);
    frame.render_widget(letters, header_layout[1]);

    if let Some(remaining) = engine.remaining() {
        let mut timer_display = format_timer(remaining);
        if engine.is_clock_paused() {
            timer_display = format!("‖ {}", timer_display);
        }
        let timer = Paragraph::new(timer_display)
            .style(Style::default().fg(timer_color(remaining)).bold())
            .alignment(Alignment::Right);
        frame.render_widget(timer, header_layout[2]);
    }
}

/// Render the main content area: input, feedback, found words or players
fn render_main(frame: &mut Frame, area: Rect, engine: &Engine<EventLog>, feedback: &str) {
    let horizontal_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(30), // Input area
            Constraint::Length(26), // Side panel
        ])
        .split(area);

    render_input_area(frame, horizontal_layout[0], engine, feedback);
    match engine.mode() {
        Mode::Single => render_found_words(frame, horizontal_layout[1], engine),
        Mode::Multiplayer => render_players(frame, horizontal_layout[1], engine),
    }
}

/// Render the input/feedback area (center panel)
fn render_input_area(frame: &mut Frame, area: Rect, engine: &Engine<EventLog>, feedback: &str) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Turn
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Input line
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Feedback line
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Score
            Constraint::Min(0),
        ])
        .split(area);

    if let Some(player) = engine
        .active_player()
        .and_then(|i| engine.session().player(i))
    {
        let turn = Paragraph::new(format!(
            "{}'s turn ({}/{})",
            player.name,
            player.turns_played + 1,
            engine.session().turns_per_round()
        ))
        .style(Style::default().fg(Color::Cyan).bold());
        frame.render_widget(turn, main_layout[0]);
    }

    let typed = alphabet::to_display_upper(&alphabet::normalize(engine.input()));
    let input_display = format!("> {}_", typed);
    let input = Paragraph::new(input_display).style(Style::default().fg(Color::White));
    frame.render_widget(input, main_layout[2]);

    let feedback = Paragraph::new(feedback).style(Style::default().fg(feedback_color(feedback)));
    frame.render_widget(feedback, main_layout[4]);

    if engine.mode() == Mode::Single {
        let score = Paragraph::new(format!("Score: {}", engine.session().solo_score()))
            .style(Style::default().fg(Color::Magenta).bold());
        frame.render_widget(score, main_layout[6]);
    }
}

/// Render the words found so far (single player side panel)
fn render_found_words(frame: &mut Frame, area: Rect, engine: &Engine<EventLog>) {
    let Some(round) = engine.round() else {
        return;
    };
    let items: Vec<ListItem> = round
        .found_words()
        .iter()
        .rev()
        .map(|found| {
            let marker = if found.bonus { " ★" } else { "" };
            ListItem::new(format!(
                "{} +{}{}",
                alphabet::to_display_upper(&found.word),
                found.points,
                marker
            ))
            .style(Style::default().fg(Color::Green))
        })
        .collect();

    let title = format!(
        "Found {}/{}",
        round.found_words().len(),
        round.solution().len()
    );
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title),
    );
    frame.render_widget(list, area);
}

/// Render every player with their score (multiplayer side panel)
fn render_players(frame: &mut Frame, area: Rect, engine: &Engine<EventLog>) {
    let active = engine.active_player();
    let turns = engine.session().turns_per_round();
    let items: Vec<ListItem> = engine
        .session()
        .players()
        .iter()
        .enumerate()
        .map(|(i, player)| {
            let is_active = active == Some(i);
            let style = if is_active {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::White)
            };
            let prefix = if is_active { ">" } else { " " };
            ListItem::new(format!(
                "{} {} - {} ({}/{})",
                prefix, player.name, player.score, player.turns_played, turns
            ))
            .style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title("Players"),
    );
    frame.render_widget(list, area);
}

/// Render the end-of-round reveal, with the definition panel if open
fn render_reveal(
    frame: &mut Frame,
    area: Rect,
    summary: &RoundSummary,
    selected_word: usize,
    definition: Option<&Definition>,
) {
    let area = match definition {
        Some(definition) => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(area);
            render_definition(frame, columns[1], definition);
            columns[0]
        }
        None => area,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!("Round {}", summary.round));
    let inner = block.inner(area);
    let (lines, selected_row) = reveal_lines(summary, selected_word, inner.width as usize);
    let offset = scroll_offset(selected_row, inner.height as usize);

    let reveal = Paragraph::new(lines).scroll((offset, 0)).block(block);
    frame.render_widget(reveal, area);
}

/// Lay out the reveal, packing words into rows no wider than `width`.
///
/// Returns the lines and the row holding the selected word.
fn reveal_lines(
    summary: &RoundSummary,
    selected_word: usize,
    width: usize,
) -> (Vec<Line<'static>>, usize) {
    let mut lines = vec![
        Line::from(format!(
            "Found {} of {} words ({}%), {} missed, {} points",
            summary.found_count,
            summary.total_count,
            summary.percentage(),
            summary.missed_count(),
            summary.total_points
        ))
        .style(Style::default().fg(Color::Yellow).bold()),
        Line::from(""),
    ];
    if summary.total_count == 0 {
        lines.push(Line::from("No words could be made from these letters."));
    }

    let mut index = 0;
    let mut selected_row = 0;
    for group in &summary.groups {
        lines.push(
            Line::from(format!("{} letters", group.length))
                .style(Style::default().fg(Color::Cyan).bold()),
        );
        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut used = 0;
        for word in &group.words {
            let text = alphabet::to_display_upper(&word.word);
            let needed = text.chars().count();
            if used > 0 && used + 2 + needed > width {
                lines.push(Line::from(std::mem::take(&mut spans)));
                used = 0;
            }
            if used > 0 {
                spans.push(Span::raw("  "));
                used += 2;
            }

            let mut style = if word.found {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            if index == selected_word {
                style = style.reversed();
                selected_row = lines.len();
            }
            spans.push(Span::styled(text, style));
            used += needed;
            index += 1;
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }
    (lines, selected_row)
}

/// First visible row so that `selected_row` stays inside a view `height` rows tall
fn scroll_offset(selected_row: usize, height: usize) -> u16 {
    let offset = selected_row.saturating_sub(height.saturating_sub(1));
    u16::try_from(offset).unwrap_or(u16::MAX)
}

/// Render a word's meanings
fn render_definition(frame: &mut Frame, area: Rect, definition: &Definition) {
    let (word, lines) = match definition {
        Definition::Loading(word) => (word, vec![Line::from("Looking up...")]),
        Definition::Ready { word, result } => (word, definition_lines(result)),
    };
    let panel = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(alphabet::to_display_upper(word)),
    );
    frame.render_widget(panel, area);
}

fn definition_lines(result: &LookupResult) -> Vec<Line<'static>> {
    match result {
        LookupResult::Found(senses) => {
            let mut lines = Vec::new();
            for (i, sense) in senses.iter().enumerate() {
                lines.push(Line::from(format!("{}. {}", i + 1, sense.meaning)));
                for example in &sense.examples {
                    lines.push(
                        Line::from(format!("   \"{}\"", example))
                            .style(Style::default().fg(Color::DarkGray).italic()),
                    );
                }
            }
            lines
        }
        LookupResult::NotFound => vec![Line::from("No meaning found for this word.")
            .style(Style::default().fg(Color::Yellow))],
        LookupResult::Unreachable => vec![Line::from("Dictionary service unreachable.")
            .style(Style::default().fg(Color::Red))],
    }
}

/// Render a ranked list of players
fn render_standings(frame: &mut Frame, area: Rect, title: &str, standings: &[Standing]) {
    let items: Vec<ListItem> = standings
        .iter()
        .enumerate()
        .map(|(i, standing)| {
            let style = if i == 0 {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(format!(
                "{} {} - {}",
                medal(i),
                standing.name,
                standing.score
            ))
            .style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title.to_string()),
    );
    frame.render_widget(list, area);
}

/// Render the end of the session
fn render_results(frame: &mut Frame, area: Rect, engine: &Engine<EventLog>) {
    match engine.mode() {
        Mode::Single => {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([
                    Constraint::Length(2), // Title
                    Constraint::Length(1), // Final score
                    Constraint::Length(1), // Words found
                    Constraint::Min(0),
                ])
                .split(area);

            let title = Paragraph::new("TIME'S UP!")
                .style(Style::default().fg(Color::Red).bold())
                .alignment(Alignment::Center);
            frame.render_widget(title, layout[0]);

            let score = Paragraph::new(format!("Final Score: {}", engine.session().solo_score()))
                .style(Style::default().fg(Color::Yellow).bold())
                .alignment(Alignment::Center);
            frame.render_widget(score, layout[1]);

            if let Some(summary) = engine.summary() {
                let words = Paragraph::new(format!(
                    "Words Found: {}/{}",
                    summary.found_count, summary.total_count
                ))
                .style(Style::default().fg(Color::Cyan))
                .alignment(Alignment::Center);
                frame.render_widget(words, layout[2]);
            }
        }
        Mode::Multiplayer => {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([Constraint::Length(2), Constraint::Min(0)])
                .split(area);

            if let Some(winner) = engine.session().winner() {
                let title = Paragraph::new(format!("{} wins!", winner.name))
                    .style(Style::default().fg(Color::Yellow).bold())
                    .alignment(Alignment::Center);
                frame.render_widget(title, layout[0]);
            }
            render_standings(frame, layout[1], "Final Standings", &engine.session().standings());
        }
    }
}

fn render_footer(frame: &mut Frame, area: Rect, text: &str) {
    let footer = Paragraph::new(text.to_string())
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

fn medal(rank: usize) -> &'static str {
    match rank {
        0 => "🥇",
        1 => "🥈",
        2 => "🥉",
        _ => "  ",
    }
}

/// Format the letters as uppercase tiles
fn format_letter_tiles(letters: &[char]) -> String {
    let tiles: Vec<String> = letters
        .iter()
        .map(|&c| alphabet::to_display_upper(&c.to_string()))
        .collect();
    format!("[ {} ]", tiles.join(" "))
}

/// Format the timer display
fn format_timer(seconds: u32) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    format!("{}:{:02}", mins, secs)
}

fn timer_color(remaining: u32) -> Color {
    if remaining <= 3 {
        Color::Red
    } else if remaining <= 10 {
        Color::Yellow
    } else {
        Color::Green
    }
}

fn feedback_color(feedback: &str) -> Color {
    if feedback.starts_with("Correct") {
        Color::Green
    } else if feedback.starts_with("Already") {
        Color::Yellow
    } else if feedback.is_empty() {
        Color::White
    } else {
        Color::Red
    }
}
