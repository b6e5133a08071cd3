//! Command-line options and game settings
//!
//! Every option has a default matching the standard game, so running
//! `kelime` with no arguments plays the usual rules with the word list from
//! the data directory.
//!
//! ```text
//! $ kelime --dictionary turkce_kelime_listesi.txt --log-file kelime.log --debug
//! $ kelime --seed 42 --solo-time 60
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Single-player time budget, in ticks
pub const DEFAULT_SOLO_TIME: u32 = 100;
/// Multiplayer per-turn time budget, in ticks
pub const DEFAULT_TURN_TIME: u32 = 5;
/// Turns each player gets per multiplayer round
pub const DEFAULT_TURNS_PER_ROUND: u32 = 5;
/// Multiplayer rounds offered by default on the setup screen
pub const DEFAULT_ROUNDS: u32 = 3;
/// Longest multiplayer game allowed
pub const MAX_ROUNDS: u32 = 10;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 5;
/// Longest player name, in characters
pub const MAX_NAME_LEN: usize = 15;
/// Length of one tick in milliseconds
pub const DEFAULT_TICK_MS: u64 = 1000;

/// A Turkish word-finding game for one or more players.
#[derive(Debug, Parser)]
#[command(about, long_about = None, version)]
pub struct Args {
    /// Word list file, one word per line
    #[arg(short = 'w', long)]
    pub dictionary: Option<PathBuf>,

    /// Word list URL, tried after the local files
    #[arg(long)]
    pub dictionary_url: Option<String>,

    /// Seed for letter generation (repeatable games)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Single-player time budget, in ticks
    #[arg(long, default_value_t = DEFAULT_SOLO_TIME)]
    pub solo_time: u32,

    /// Multiplayer turn time budget, in ticks
    #[arg(long, default_value_t = DEFAULT_TURN_TIME)]
    pub turn_time: u32,

    /// Turns per player in each multiplayer round
    #[arg(long, default_value_t = DEFAULT_TURNS_PER_ROUND)]
    pub turns_per_round: u32,

    /// Tick length in milliseconds
    #[arg(long, default_value_t = DEFAULT_TICK_MS)]
    pub tick_ms: u64,

    /// Write log messages to this file
    #[arg(short, long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,
}

/// Timing and rule settings used by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub solo_time: u32,
    pub turn_time: u32,
    pub turns_per_round: u32,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            solo_time: DEFAULT_SOLO_TIME,
            turn_time: DEFAULT_TURN_TIME,
            turns_per_round: DEFAULT_TURNS_PER_ROUND,
            seed: None,
        }
    }
}

impl Args {
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            solo_time: self.solo_time.max(1),
            turn_time: self.turn_time.max(1),
            turns_per_round: self.turns_per_round.max(1),
            seed: self.seed,
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(10))
    }
}
