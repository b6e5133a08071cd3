//! Lexicon loading and lookup
//!
//! The word list is plain UTF-8 text, one word per line. Every candidate is
//! trimmed, lowercased with Turkish rules, stripped of circumflexes and kept
//! only if it has at least `MIN_WORD_LENGTH` letters.
//!
//! Loading never fails: sources are tried in order and, when all of them
//! fail, a tiny built-in list keeps the game playable.

use super::alphabet;
use crate::error::DictionaryError;
use directories::ProjectDirs;
use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Shortest word the game accepts
pub const MIN_WORD_LENGTH: usize = 4;

/// File name looked up in the data directory
pub const DICTIONARY_FILE: &str = "words.txt";

/// Timeout for fetching a word list over HTTP
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Used when no source can be loaded
const FALLBACK_WORDS: [&str; 4] = ["test", "kelime", "oyun", "deneme"];

/// Where a word list can come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionarySource {
    /// A file on disk
    File(PathBuf),
    /// A plain-text word list served over HTTP
    Url(String),
}

impl fmt::Display for DictionarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictionarySource::File(path) => write!(f, "{}", path.display()),
            DictionarySource::Url(url) => write!(f, "{}", url),
        }
    }
}

impl DictionarySource {
    /// Read the raw text of this source.
    fn read(&self) -> Result<String, DictionaryError> {
        match self {
            DictionarySource::File(path) => fs::read_to_string(path).map_err(|source| {
                DictionaryError::Read {
                    path: path.clone(),
                    source,
                }
            }),
            DictionarySource::Url(url) => fetch(url),
        }
    }
}

fn fetch(url: &str) -> Result<String, DictionaryError> {
    let fetch_error = |source| DictionaryError::Fetch {
        url: url.to_string(),
        source,
    };
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(fetch_error)?;
    client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .map_err(fetch_error)
}

/// Default word list location in the OS data directory.
pub fn default_dictionary_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "kelime", "kelime").map(|dirs| dirs.data_dir().join(DICTIONARY_FILE))
}

/// Which source ended up providing the words
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOrigin {
    Source(DictionarySource),
    Fallback,
}

/// The set of playable words.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    words: BTreeSet<String>,
}

impl Lexicon {
    /// Build a lexicon from raw text, one word per line.
    pub fn from_text(text: &str) -> Self {
        Self::from_words(text.lines())
    }

    /// Build a lexicon from individual raw words.
    pub fn from_words<'a, I>(raw: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let words = raw
            .into_iter()
            .map(alphabet::normalize)
            .filter(|word| word.chars().count() >= MIN_WORD_LENGTH)
            .collect();
        Self { words }
    }

    /// The built-in list used when nothing else loads.
    pub fn fallback() -> Self {
        Self::from_words(FALLBACK_WORDS)
    }

    /// Load one source.
    pub fn load(source: &DictionarySource) -> Result<Self, DictionaryError> {
        let text = source.read()?;
        let lexicon = Self::from_text(&text);
        if lexicon.is_empty() {
            return Err(DictionaryError::Empty(source.to_string()));
        }
        Ok(lexicon)
    }

    /// Try each source in order, falling back to the built-in list.
    pub fn load_first(sources: &[DictionarySource]) -> (Self, LoadOrigin) {
        for source in sources {
            match Self::load(source) {
                Ok(lexicon) => {
                    info!("Loaded {} words from {}", lexicon.len(), source);
                    return (lexicon, LoadOrigin::Source(source.clone()));
                }
                Err(e) => warn!("Dictionary source failed: {}", e),
            }
        }
        let lexicon = Self::fallback();
        warn!(
            "No dictionary could be loaded, using {} built-in words",
            lexicon.len()
        );
        (lexicon, LoadOrigin::Fallback)
    }

    /// Check if a normalized word is in the lexicon.
    #[cfg(test)]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Iterate over every word, in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Build the ordered source list from the command-line choices.
pub fn sources(path: Option<&Path>, url: Option<&str>) -> Vec<DictionarySource> {
    let mut sources = Vec::new();
    if let Some(path) = path {
        sources.push(DictionarySource::File(path.to_path_buf()));
    }
    if let Some(default) = default_dictionary_path() {
        sources.push(DictionarySource::File(default));
    }
    if let Some(url) = url {
        sources.push(DictionarySource::Url(url.to_string()));
    }
    debug!("Dictionary sources: {:?}", sources);
    sources
}
