//! Word scoring and the longest-word bonus
//!
//! `score` is a pure query. Recording that a bonus was paid is a separate
//! step (`BonusLedger::register`) so asking twice never pays twice.

use super::solver::RoundSolution;
use std::collections::HashSet;

/// Points per letter of an accepted word
pub const POINTS_PER_LETTER: u32 = 10;

/// Multiplier for a longest word found for the first time
pub const BONUS_MULTIPLIER: u32 = 2;

/// Points for one accepted word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub points: u32,
    pub bonus: bool,
}

/// Longest words that have already been paid a bonus this round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BonusLedger {
    paid: HashSet<String>,
}

impl BonusLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `word` received its bonus.
    ///
    /// Returns false if it already had.
    pub fn register(&mut self, word: &str) -> bool {
        self.paid.insert(word.to_string())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.paid.contains(word)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.paid.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.paid.is_empty()
    }
}

/// Base points for a word: letters × 10.
pub fn base_points(word: &str) -> u32 {
    word.chars().count() as u32 * POINTS_PER_LETTER
}

/// Score a word that has already been judged correct and new.
///
/// Doubles the points when the word has the solution's maximum length and
/// has not been paid a bonus yet. Does not touch the ledger.
pub fn score(word: &str, solution: &RoundSolution, ledger: &BonusLedger) -> Score {
    let base = base_points(word);
    let longest = solution.max_len() > 0 && word.chars().count() == solution.max_len();
    if longest && !ledger.contains(word) {
        Score {
            points: base * BONUS_MULTIPLIER,
            bonus: true,
        }
    } else {
        Score {
            points: base,
            bonus: false,
        }
    }
}
