//! Exhaustive solving of a letter bag against the lexicon
//!
//! A word is formable when the bag holds every letter it needs, counting
//! multiplicity. Solving runs once per round, before play starts, so the
//! referee only ever compares submissions against a finished answer set.

use super::dictionary::{Lexicon, MIN_WORD_LENGTH};
use super::LetterBag;
use log::debug;
use std::collections::{HashMap, HashSet};

/// Every word playable from one bag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundSolution {
    /// Solution words, in lexicon order
    words: Vec<String>,
    lookup: HashSet<String>,
    /// Length (in letters) of the longest word, 0 when there are no words
    max_len: usize,
}

impl RoundSolution {
    pub fn new(words: Vec<String>) -> Self {
        let max_len = words.iter().map(|w| w.chars().count()).max().unwrap_or(0);
        let lookup = words.iter().cloned().collect();
        Self {
            words,
            lookup,
            max_len,
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.lookup.contains(word)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Words that qualify for the longest-word bonus
    #[cfg(test)]
    pub fn longest_words(&self) -> impl Iterator<Item = &str> {
        self.words
            .iter()
            .filter(|w| self.max_len > 0 && w.chars().count() == self.max_len)
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Check whether `word` can be spelled from the letter counts of a bag.
///
/// Letters are consumed left to right, so a word needing more copies of a
/// letter than the bag holds is rejected.
pub fn can_form(word: &str, counts: &HashMap<char, usize>) -> bool {
    let mut available = counts.clone();
    for c in word.chars() {
        match available.get_mut(&c) {
            Some(n) if *n > 0 => *n -= 1,
            _ => return false,
        }
    }
    true
}

/// Find every lexicon word formable from `bag`.
pub fn solve(bag: &LetterBag, lexicon: &Lexicon) -> RoundSolution {
    let counts = bag.counts();
    let words: Vec<String> = lexicon
        .iter()
        .filter(|word| word.chars().count() >= MIN_WORD_LENGTH && can_form(word, &counts))
        .map(str::to_string)
        .collect();
    let solution = RoundSolution::new(words);
    debug!(
        "Solved bag {}: {} words, longest {} letters",
        bag.as_string(),
        solution.len(),
        solution.max_len()
    );
    solution
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bag(letters: &str) -> LetterBag {
        LetterBag::from_letters(&letters.chars().collect::<Vec<_>>())
    }

    #[test]
    fn test_finds_formable_words() {
        let lexicon = Lexicon::from_text("kalem\nelma\nmasa\nkelime\nlale\n");
        let solution = solve(&bag("aeinrlmksu"), &lexicon);
        assert!(solution.contains("kalem"));
        assert!(solution.contains("elma"));
        // needs two a's
        assert!(!solution.contains("masa"));
        // needs two e's
        assert!(!solution.contains("kelime"));
        // needs two l's
        assert!(!solution.contains("lale"));
        assert_eq!(solution.max_len(), 5);
    }

    #[test]
    fn test_multiplicity_respected() {
        let counts = bag("aabc").counts();
        assert!(can_form("aab", &counts));
        assert!(!can_form("aaab", &counts));
        assert!(!can_form("abd", &counts));
    }

    #[test]
    fn test_every_solution_word_is_formable() {
        let lexicon = Lexicon::from_text("sınır\nanlam\ntane\nsıra\nrenk\nkeşif\nteker\n");
        let b = bag("aeınrlşktf");
        let solution = solve(&b, &lexicon);
        let counts = b.counts();
        assert!(!solution.is_empty());
        for word in solution.words() {
            assert!(word.chars().count() >= MIN_WORD_LENGTH);
            assert!(can_form(word, &counts), "{} not formable", word);
        }
    }

    #[test]
    fn test_empty_solution_has_zero_max_len() {
        let lexicon = Lexicon::from_text("zürafa\n");
        let solution = solve(&bag("aeinrlmksu"), &lexicon);
        assert!(solution.is_empty());
        assert_eq!(solution.max_len(), 0);
        assert_eq!(solution.longest_words().count(), 0);
    }

    #[test]
    fn test_longest_words_lists_all_ties() {
        let solution = RoundSolution::new(vec![
            "kalem".to_string(),
            "elma".to_string(),
            "lakem".to_string(),
        ]);
        let longest: Vec<&str> = solution.longest_words().collect();
        assert_eq!(longest, vec!["kalem", "lakem"]);
    }

    #[test]
    fn test_length_uses_letters() {
        let solution = RoundSolution::new(vec!["şığı".to_string(), "kasa".to_string()]);
        assert_eq!(solution.max_len(), 4);
    }
}
