//! Game sessions: mode, players and round bookkeeping

use super::events::Standing;
use crate::config::{GameConfig, MAX_NAME_LEN, MAX_PLAYERS, MAX_ROUNDS, MIN_PLAYERS};
use crate::error::SetupError;
use std::collections::HashSet;

/// Single-player or local multiplayer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Single,
    Multiplayer,
}

/// A multiplayer participant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    /// Sum over all rounds
    pub score: u32,
    /// Turns consumed in the current round
    pub turns_played: u32,
}

impl Player {
    pub fn new(name: String) -> Self {
        Self {
            name,
            score: 0,
            turns_played: 0,
        }
    }
}

/// Check the names typed on the setup screen.
///
/// Blank entries are dropped and names are cut to `MAX_NAME_LEN` letters.
/// Names must be unique regardless of case.
pub fn validate_names<S: AsRef<str>>(raw: &[S]) -> Result<Vec<String>, SetupError> {
    let names: Vec<String> = raw
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.chars().take(MAX_NAME_LEN).collect::<String>().trim_end().to_string())
        .collect();

    if names.len() < MIN_PLAYERS {
        return Err(SetupError::TooFewPlayers {
            min: MIN_PLAYERS,
            got: names.len(),
        });
    }
    if names.len() > MAX_PLAYERS {
        return Err(SetupError::TooManyPlayers {
            max: MAX_PLAYERS,
            got: names.len(),
        });
    }

    let mut seen = HashSet::new();
    for name in &names {
        if !seen.insert(name.to_lowercase()) {
            return Err(SetupError::DuplicateName(name.clone()));
        }
    }
    Ok(names)
}

/// Everything that lives for one game, from setup to return to the menu.
#[derive(Debug, Clone)]
pub struct Session {
    mode: Mode,
    players: Vec<Player>,
    /// 1-based; 0 until the first round starts
    current_round: u32,
    total_rounds: u32,
    turns_per_round: u32,
    /// Single-player score
    solo_score: u32,
}

impl Session {
    /// A one-round single-player game.
    pub fn single() -> Self {
        Self {
            mode: Mode::Single,
            players: Vec::new(),
            current_round: 0,
            total_rounds: 1,
            turns_per_round: 0,
            solo_score: 0,
        }
    }

    /// A multiplayer game, after validating the setup.
    pub fn multiplayer<S: AsRef<str>>(
        names: &[S],
        rounds: u32,
        config: &GameConfig,
    ) -> Result<Self, SetupError> {
        let names = validate_names(names)?;
        if rounds == 0 || rounds > MAX_ROUNDS {
            return Err(SetupError::InvalidRounds {
                max: MAX_ROUNDS,
                got: rounds,
            });
        }
        Ok(Self {
            mode: Mode::Multiplayer,
            players: names.into_iter().map(Player::new).collect(),
            current_round: 0,
            total_rounds: rounds,
            turns_per_round: config.turns_per_round,
            solo_score: 0,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    pub fn turns_per_round(&self) -> u32 {
        self.turns_per_round
    }

    pub fn solo_score(&self) -> u32 {
        self.solo_score
    }

    pub fn has_rounds_left(&self) -> bool {
        self.current_round < self.total_rounds
    }

    /// Move to the next round and reset every turn counter.
    pub fn begin_round(&mut self) -> u32 {
        self.current_round += 1;
        for player in &mut self.players {
            player.turns_played = 0;
        }
        self.current_round
    }

    /// Credit points to a player, or to the solo score in single-player.
    pub fn award(&mut self, player: Option<usize>, points: u32) {
        match player.and_then(|i| self.players.get_mut(i)) {
            Some(p) => p.score += points,
            None => self.solo_score += points,
        }
    }

    /// Count one consumed turn for a player.
    pub fn consume_turn(&mut self, player: usize) {
        if let Some(p) = self.players.get_mut(player) {
            p.turns_played += 1;
        }
    }

    /// Turns consumed so far this round, across all players
    #[cfg(test)]
    pub fn turns_elapsed(&self) -> u32 {
        self.players.iter().map(|p| p.turns_played).sum()
    }

    /// Every player has used all their turns this round.
    pub fn round_complete(&self) -> bool {
        !self.players.is_empty()
            && self
                .players
                .iter()
                .all(|p| p.turns_played >= self.turns_per_round)
    }

    /// Players by cumulative score, best first. Ties keep roster order.
    pub fn standings(&self) -> Vec<Standing> {
        let mut ranked: Vec<Standing> = self
            .players
            .iter()
            .map(|p| Standing {
                name: p.name.clone(),
                score: p.score,
            })
            .collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }

    /// Highest cumulative score; the earliest player wins ties.
    pub fn winner(&self) -> Option<Standing> {
        self.standings().into_iter().next()
    }
}
