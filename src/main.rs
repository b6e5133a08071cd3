//! Kelime - a Turkish word-finding game for the terminal
//!
//! Make as many words as you can from ten letters before the clock runs out,
//! alone or taking turns with friends.

mod app;
mod config;
mod error;
mod game;
mod lookup;
mod tui;

use anyhow::{Context, Result};
use app::AppCoordinator;
use clap::Parser;
use config::Args;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use game::dictionary::{self, Lexicon, LoadOrigin};
use log::{info, LevelFilter};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tui::Tui;

/// Set up logging.
///
/// The terminal belongs to the UI while the game runs, so logs go to the
/// given file when there is one and to stderr otherwise.
fn init_logging(log_file: Option<&Path>, debug: bool) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    if let Some(path) = log_file {
        let log_output = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
        if !debug {
            builder.filter_level(LevelFilter::Info);
        }
        builder.target(env_logger::Target::Pipe(Box::new(log_output)));
    }
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref(), args.debug)?;

    let sources = dictionary::sources(args.dictionary.as_deref(), args.dictionary_url.as_deref());
    let (lexicon, origin) = Lexicon::load_first(&sources);
    let notice = match origin {
        LoadOrigin::Fallback => Some(format!(
            "Word list unavailable, playing with {} built-in words",
            lexicon.len()
        )),
        LoadOrigin::Source(source) => {
            info!("Playing with words from {}", source);
            None
        }
    };

    let mut coordinator = AppCoordinator::new(Arc::new(lexicon), args.game_config(), notice);

    tui::install_panic_hook();
    let mut terminal = Tui::new().context("cannot open the terminal")?;
    terminal.enter().context("cannot switch the terminal to game mode")?;

    let tick_rate = args.tick_rate();
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| tui::render(frame, &coordinator))?;

        // Calculate timeout for next tick
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Esc => coordinator.on_escape(),
                        KeyCode::Enter => coordinator.on_enter(),
                        KeyCode::Backspace => coordinator.on_backspace(),
                        KeyCode::Tab => coordinator.on_tab(),
                        KeyCode::Up => coordinator.on_up(),
                        KeyCode::Down => coordinator.on_down(),
                        KeyCode::Left => coordinator.on_horizontal(false),
                        KeyCode::Right => coordinator.on_horizontal(true),
                        KeyCode::Char(c) => coordinator.on_char(c),
                        _ => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            coordinator.tick();
            last_tick = Instant::now();
        }
        coordinator.poll();

        if coordinator.should_quit {
            break;
        }
    }

    terminal.exit()?;
    info!("Bye");
    Ok(())
}
