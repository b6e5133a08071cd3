//! Game logic: alphabet, letter bags, lexicon, solving, scoring, rounds

pub mod alphabet;
pub mod dictionary;
pub mod round;
pub mod scoring;
pub mod solver;
pub mod timer;

use alphabet::{LetterClass, ALPHABET};
use log::debug;
use rand::distr::weighted::WeightedIndex;
use rand::prelude::*;
use std::collections::HashMap;

/// Vowels drawn per bag
pub const BAG_VOWELS: usize = 4;
/// Consonants drawn per bag
pub const BAG_CONSONANTS: usize = 6;
/// Total bag size
#[cfg(test)]
pub const BAG_SIZE: usize = BAG_VOWELS + BAG_CONSONANTS;
/// How many copies of one letter a bag may hold before re-drawing
const MAX_COPIES: usize = 2;
/// Re-draws allowed per slot before the last draw is accepted anyway
const MAX_ATTEMPTS: usize = 100;

/// The letters available for one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterBag {
    letters: Vec<char>,
}

impl LetterBag {
    /// Generate a bag using a specific RNG (for testing/seeding).
    ///
    /// Each pool is sampled by frequency weight. A letter already drawn
    /// twice is re-drawn, up to `MAX_ATTEMPTS` times, after which the last
    /// draw is kept. The combined letters are then shuffled.
    pub fn generate_with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut letters = draw_from_pool(rng, LetterClass::Vowel, BAG_VOWELS);
        letters.extend(draw_from_pool(rng, LetterClass::Consonant, BAG_CONSONANTS));
        letters.shuffle(rng);
        Self { letters }
    }

    /// Letter -> number of copies in the bag
    pub fn counts(&self) -> HashMap<char, usize> {
        let mut counts = HashMap::new();
        for &c in &self.letters {
            *counts.entry(c).or_insert(0) += 1;
        }
        counts
    }

    /// Get the letters in the bag.
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Display the bag as a string.
    pub fn as_string(&self) -> String {
        self.letters.iter().collect()
    }
}

#[cfg(test)]
impl LetterBag {
    /// Generate a new random bag of 4 vowels and 6 consonants.
    pub fn generate() -> Self {
        Self::generate_with_rng(&mut rand::rng())
    }

    /// Build a bag from known letters (normalized to lowercase).
    pub fn from_letters(letters: &[char]) -> Self {
        let text: String = letters.iter().collect();
        Self {
            letters: alphabet::normalize(&text).chars().collect(),
        }
    }

    pub fn vowel_count(&self) -> usize {
        self.letters.iter().filter(|&&c| alphabet::is_vowel(c)).count()
    }

    pub fn consonant_count(&self) -> usize {
        self.letters.len() - self.vowel_count()
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }
}

fn draw_from_pool<R: Rng + ?Sized>(rng: &mut R, class: LetterClass, count: usize) -> Vec<char> {
    let pool: Vec<char> = ALPHABET
        .iter()
        .filter(|l| l.class == class)
        .map(|l| l.symbol)
        .collect();
    let weights: Vec<f64> = ALPHABET
        .iter()
        .filter(|l| l.class == class)
        .map(|l| l.weight)
        .collect();
    let dist = WeightedIndex::new(&weights).expect("alphabet weights are positive");

    let mut drawn: Vec<char> = Vec::with_capacity(count);
    let mut copies: HashMap<char, usize> = HashMap::new();
    for _ in 0..count {
        let mut candidate = pool[dist.sample(rng)];
        let mut attempts = 1;
        while copies.get(&candidate).copied().unwrap_or(0) >= MAX_COPIES {
            if attempts >= MAX_ATTEMPTS {
                debug!("accepting extra copy of '{}' after {} draws", candidate, attempts);
                break;
            }
            candidate = pool[dist.sample(rng)];
            attempts += 1;
        }
        *copies.entry(candidate).or_insert(0) += 1;
        drawn.push(candidate);
    }
    drawn
}

/// Anything that can hand the engine a fresh bag for each round.
pub trait LetterSource {
    fn draw(&mut self) -> LetterBag;
}

/// Frequency-weighted random bags.
pub struct WeightedLetters<R: Rng> {
    rng: R,
}

impl<R: Rng> WeightedLetters<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl WeightedLetters<StdRng> {
    /// Seeded when a seed is given, from the OS otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(StdRng::seed_from_u64(seed)),
            None => Self::new(StdRng::from_os_rng()),
        }
    }
}

impl<R: Rng> LetterSource for WeightedLetters<R> {
    fn draw(&mut self) -> LetterBag {
        LetterBag::generate_with_rng(&mut self.rng)
    }
}

/// Replays a fixed list of bags in order, cycling when exhausted.
#[cfg(test)]
pub struct FixedLetters {
    bags: Vec<LetterBag>,
    next: usize,
}

#[cfg(test)]
impl FixedLetters {
    pub fn new(bags: Vec<LetterBag>) -> Self {
        Self { bags, next: 0 }
    }
}

#[cfg(test)]
impl LetterSource for FixedLetters {
    fn draw(&mut self) -> LetterBag {
        if self.bags.is_empty() {
            return LetterBag::from_letters(&[]);
        }
        let bag = self.bags[self.next % self.bags.len()].clone();
        self.next += 1;
        bag
    }
}
