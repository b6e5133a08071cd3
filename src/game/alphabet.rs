//! The Turkish alphabet used by the game
//!
//! Holds the 29-letter inventory with its text-frequency weights and
//! vowel/consonant classes, plus the locale rules the rest of the game
//! depends on: case folding (`I` → `ı`, `İ` → `i`), circumflex collapsing
//! (`â î û`) and alphabetical ordering.

use once_cell::sync::Lazy;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Vowel or consonant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterClass {
    Vowel,
    Consonant,
}

/// One letter of the alphabet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letter {
    pub symbol: char,
    /// Share of Turkish text, in percent
    pub weight: f64,
    pub class: LetterClass,
}

const fn vowel(symbol: char, weight: f64) -> Letter {
    Letter {
        symbol,
        weight,
        class: LetterClass::Vowel,
    }
}

const fn consonant(symbol: char, weight: f64) -> Letter {
    Letter {
        symbol,
        weight,
        class: LetterClass::Consonant,
    }
}

/// Letters in alphabetical order.
pub const ALPHABET: [Letter; 29] = [
    vowel('a', 11.92),
    consonant('b', 2.85),
    consonant('c', 1.45),
    consonant('ç', 1.13),
    consonant('d', 3.74),
    vowel('e', 8.91),
    consonant('f', 0.84),
    consonant('g', 2.18),
    consonant('ğ', 0.68),
    consonant('h', 1.85),
    vowel('ı', 2.77),
    vowel('i', 8.60),
    consonant('j', 0.25),
    consonant('k', 4.68),
    consonant('l', 5.75),
    consonant('m', 3.75),
    consonant('n', 7.48),
    vowel('o', 3.51),
    vowel('ö', 0.78),
    consonant('p', 1.64),
    consonant('r', 6.95),
    consonant('s', 4.59),
    consonant('ş', 1.58),
    consonant('t', 5.54),
    vowel('u', 4.34),
    vowel('ü', 0.69),
    consonant('v', 2.25),
    consonant('y', 3.49),
    consonant('z', 2.75),
];

/// Symbol -> position in `ALPHABET`
static POSITIONS: Lazy<HashMap<char, usize>> = Lazy::new(|| {
    ALPHABET
        .iter()
        .enumerate()
        .map(|(i, letter)| (letter.symbol, i))
        .collect()
});

/// Look up a letter by its (lowercase) symbol.
pub fn letter(symbol: char) -> Option<&'static Letter> {
    POSITIONS.get(&symbol).map(|&i| &ALPHABET[i])
}

/// Check whether a symbol is a vowel of the alphabet.
#[cfg(test)]
pub fn is_vowel(symbol: char) -> bool {
    matches!(letter(symbol), Some(l) if l.class == LetterClass::Vowel)
}

/// All letters of one class, in alphabetical order.
#[cfg(test)]
pub fn letters_of(class: LetterClass) -> Vec<&'static Letter> {
    ALPHABET.iter().filter(|l| l.class == class).collect()
}

/// Lowercase one character using Turkish rules.
fn fold_char(c: char, out: &mut String) {
    match c {
        'I' => out.push('ı'),
        'İ' => out.push('i'),
        _ => out.extend(c.to_lowercase()),
    }
}

/// Map circumflexed vowels onto their base vowel, keeping case.
fn strip_circumflex(c: char) -> char {
    match c {
        'â' => 'a',
        'Â' => 'A',
        'î' => 'i',
        'Î' => 'I',
        'û' => 'u',
        'Û' => 'U',
        _ => c,
    }
}

/// Normalize a raw word the way the lexicon stores it.
///
/// Trims, lowercases with Turkish casing, then collapses circumflexed vowels.
/// Folding happens first so that `Î` lands on `i` rather than `ı`.
pub fn normalize(raw: &str) -> String {
    let mut folded = String::with_capacity(raw.len());
    for c in raw.trim().chars() {
        fold_char(c, &mut folded);
    }
    folded.chars().map(strip_circumflex).collect()
}

/// Check whether a typed character, in either case, is a letter of the alphabet.
pub fn is_typeable(c: char) -> bool {
    let mut folded = String::new();
    fold_char(c, &mut folded);
    let mut chars = folded.chars().map(strip_circumflex);
    matches!((chars.next(), chars.next()), (Some(c), None) if letter(c).is_some())
}

/// Uppercase a normalized word for display (`i` → `İ`, `ı` → `I`).
pub fn to_display_upper(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    for c in word.chars() {
        match c {
            'i' => out.push('İ'),
            'ı' => out.push('I'),
            _ => out.extend(c.to_uppercase()),
        }
    }
    out
}

/// Compare two normalized words in Turkish alphabetical order.
///
/// Characters outside the alphabet sort after every letter, by code point.
pub fn collate(a: &str, b: &str) -> Ordering {
    let key = |c: char| match POSITIONS.get(&c) {
        Some(&i) => (0, i as u32),
        None => (1, c as u32),
    };
    a.chars().map(key).cmp(b.chars().map(key))
}
