//! One round of play: the bag, its solution and what has been found

use super::alphabet;
use super::dictionary::Lexicon;
use super::scoring::{self, BonusLedger, Score};
use super::solver::{self, RoundSolution};
use super::LetterBag;
use std::collections::BTreeMap;

/// A word found this round with its point value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundWord {
    pub word: String,
    pub points: u32,
    pub bonus: bool,
}

/// Result of judging one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Correct and new
    Accepted(FoundWord),
    /// Not in the solution
    Wrong,
    /// Already found this round
    Duplicate,
}

/// A bag, its precomputed solution and the words found so far.
#[derive(Debug, Clone)]
pub struct Round {
    number: u32,
    bag: LetterBag,
    solution: RoundSolution,
    found: Vec<FoundWord>,
    bonuses: BonusLedger,
}

impl Round {
    /// Solve `bag` against `lexicon` and open the round.
    pub fn new(number: u32, bag: LetterBag, lexicon: &Lexicon) -> Self {
        let solution = solver::solve(&bag, lexicon);
        Self::with_solution(number, bag, solution)
    }

    pub fn with_solution(number: u32, bag: LetterBag, solution: RoundSolution) -> Self {
        Self {
            number,
            bag,
            solution,
            found: Vec::new(),
            bonuses: BonusLedger::new(),
        }
    }

    /// Judge a normalized word and record it if it is correct and new.
    pub fn judge(&mut self, word: &str) -> Verdict {
        if !self.solution.contains(word) {
            return Verdict::Wrong;
        }
        if self.is_found(word) {
            return Verdict::Duplicate;
        }

        let Score { points, bonus } = scoring::score(word, &self.solution, &self.bonuses);
        if bonus {
            self.bonuses.register(word);
        }
        let found = FoundWord {
            word: word.to_string(),
            points,
            bonus,
        };
        self.found.push(found.clone());
        Verdict::Accepted(found)
    }

    pub fn is_found(&self, word: &str) -> bool {
        self.found.iter().any(|f| f.word == word)
    }

    pub fn bag(&self) -> &LetterBag {
        &self.bag
    }

    pub fn solution(&self) -> &RoundSolution {
        &self.solution
    }

    /// Words found so far, in the order they were found
    pub fn found_words(&self) -> &[FoundWord] {
        &self.found
    }

    #[cfg(test)]
    pub fn bonuses(&self) -> &BonusLedger {
        &self.bonuses
    }

    /// Points scored by everyone this round
    pub fn total_points(&self) -> u32 {
        self.found.iter().map(|f| f.points).sum()
    }

    /// Build the end-of-round reveal.
    pub fn summary(&self) -> RoundSummary {
        let mut by_length: BTreeMap<usize, Vec<SolutionWord>> = BTreeMap::new();
        for word in self.solution.words() {
            by_length
                .entry(word.chars().count())
                .or_default()
                .push(SolutionWord {
                    word: word.clone(),
                    found: self.is_found(word),
                });
        }
        for words in by_length.values_mut() {
            words.sort_by(|a, b| alphabet::collate(&a.word, &b.word));
        }

        RoundSummary {
            round: self.number,
            letters: self.bag.letters().to_vec(),
            groups: by_length
                .into_iter()
                .map(|(length, words)| LengthGroup { length, words })
                .collect(),
            found_count: self.found.len(),
            total_count: self.solution.len(),
            total_points: self.total_points(),
        }
    }
}

/// A solution word and whether anyone found it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionWord {
    pub word: String,
    pub found: bool,
}

/// Solution words of one length, alphabetical
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthGroup {
    pub length: usize,
    pub words: Vec<SolutionWord>,
}

/// End-of-round reveal of the whole solution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundSummary {
    pub round: u32,
    pub letters: Vec<char>,
    /// Groups ordered by increasing length
    pub groups: Vec<LengthGroup>,
    pub found_count: usize,
    pub total_count: usize,
    pub total_points: u32,
}

impl RoundSummary {
    pub fn missed_count(&self) -> usize {
        self.total_count - self.found_count
    }

    /// Share of the solution found, rounded to a whole percent
    pub fn percentage(&self) -> u32 {
        if self.total_count == 0 {
            0
        } else {
            ((self.found_count as f64 / self.total_count as f64) * 100.0).round() as u32
        }
    }

    /// All solution words, group by group
    pub fn words(&self) -> impl Iterator<Item = &SolutionWord> {
        self.groups.iter().flat_map(|g| g.words.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_round() -> Round {
        let lexicon = Lexicon::from_text("kalem\nelma\nlake\nkelt\nkalemtır\nmasa\n");
        let bag = LetterBag::from_letters(&['a', 'e', 'ı', 'n', 'r', 'l', 't', 'k', 'm', 'u']);
        Round::new(1, bag, &lexicon)
    }

    #[test]
    fn test_correct_word_accepted() {
        let mut round = test_round();
        assert_eq!(
            round.judge("elma"),
            Verdict::Accepted(FoundWord {
                word: "elma".to_string(),
                points: 40,
                bonus: false
            })
        );
        assert_eq!(round.found_words().len(), 1);
    }

    #[test]
    fn test_wrong_and_duplicate() {
        let mut round = test_round();
        assert_eq!(round.judge("masa"), Verdict::Wrong);
        assert_eq!(round.judge("zzzz"), Verdict::Wrong);
        assert!(matches!(round.judge("kalem"), Verdict::Accepted(_)));
        assert_eq!(round.judge("kalem"), Verdict::Duplicate);
        assert_eq!(round.found_words().len(), 1);
        assert_eq!(round.total_points(), 50);
    }

    #[test]
    fn test_longest_word_bonus_once() {
        let mut round = test_round();
        assert_eq!(round.solution().max_len(), 8);
        match round.judge("kalemtır") {
            Verdict::Accepted(found) => {
                assert_eq!(found.points, 160);
                assert!(found.bonus);
            }
            other => panic!("expected acceptance, got {:?}", other),
        }
        assert!(round.bonuses().contains("kalemtır"));
        assert_eq!(round.judge("kalemtır"), Verdict::Duplicate);
        assert_eq!(round.total_points(), 160);
    }

    #[test]
    fn test_bonus_only_for_found_longest_words() {
        let mut round = test_round();
        round.judge("elma");
        round.judge("kalem");
        assert!(round.bonuses().is_empty());
        for word in round.solution().longest_words() {
            assert!(!round.bonuses().contains(word));
        }
    }

    #[test]
    fn test_summary_groups_by_length() {
        let mut round = test_round();
        round.judge("lake");
        let summary = round.summary();
        let lengths: Vec<usize> = summary.groups.iter().map(|g| g.length).collect();
        assert_eq!(lengths, vec![4, 5, 8]);

        let four: Vec<(&str, bool)> = summary.groups[0]
            .words
            .iter()
            .map(|w| (w.word.as_str(), w.found))
            .collect();
        assert_eq!(four, vec![("elma", false), ("kelt", false), ("lake", true)]);

        assert_eq!(summary.total_count, 5);
        assert_eq!(summary.found_count, 1);
        assert_eq!(summary.missed_count(), 4);
        assert_eq!(summary.percentage(), 20);
    }

    #[test]
    fn test_empty_round_summary() {
        let lexicon = Lexicon::from_text("zürafa\n");
        let bag = LetterBag::from_letters(&['a', 'e']);
        let mut round = Round::new(2, bag, &lexicon);
        assert_eq!(round.judge("zürafa"), Verdict::Wrong);
        let summary = round.summary();
        assert!(summary.groups.is_empty());
        assert_eq!(summary.percentage(), 0);
        assert_eq!(summary.round, 2);
    }
}
