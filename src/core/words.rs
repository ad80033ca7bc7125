//! Word pair catalog and per-game word assignment.
//!
//! A catalog is an ordered list of unordered word pairs. Which side of a
//! pair goes to the Civilians is decided by a coin flip each time the pair
//! is drawn, so catalog files carry no civilian/undercover labelling.
//!
//! ## File format
//!
//! A JSON array whose entries are either two-element arrays or objects
//! with `civilian` and `undercover` keys (the labels are ignored):
//!
//! ```json
//! [["cat", "dog"], { "civilian": "sun", "undercover": "moon" }]
//! ```

use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::error::CatalogError;
use super::player::Role;
use super::rng::GameRng;

/// Pairs dealt when no catalog file is supplied. Edit the data file to
/// change them.
const BUILTIN_CATALOG: &str = include_str!("../../data/word_pairs.json");

/// Two related words. Neither side is privileged.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "PairRecord", into = "[String; 2]")]
pub struct WordPair {
    pub first: String,
    pub second: String,
}

impl WordPair {
    /// Create a pair. Surrounding whitespace is trimmed from both words.
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: trimmed(first.into()),
            second: trimmed(second.into()),
        }
    }

    fn check(&self, index: usize) -> Result<(), CatalogError> {
        if self.first.is_empty() || self.second.is_empty() {
            return Err(CatalogError::MalformedPair {
                index,
                reason: "blank word",
            });
        }
        if self.first == self.second {
            return Err(CatalogError::MalformedPair {
                index,
                reason: "both words are the same",
            });
        }
        Ok(())
    }
}

fn trimmed(word: String) -> String {
    if word.trim().len() == word.len() {
        word
    } else {
        word.trim().to_string()
    }
}

/// On-disk shapes accepted for a pair.
#[derive(Deserialize)]
#[serde(untagged)]
enum PairRecord {
    Tuple([String; 2]),
    Labeled { civilian: String, undercover: String },
}

impl From<PairRecord> for WordPair {
    fn from(record: PairRecord) -> Self {
        match record {
            PairRecord::Tuple([first, second]) => Self::new(first, second),
            PairRecord::Labeled {
                civilian,
                undercover,
            } => Self::new(civilian, undercover),
        }
    }
}

impl From<WordPair> for [String; 2] {
    fn from(pair: WordPair) -> Self {
        [pair.first, pair.second]
    }
}

/// The words dealt for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordAssignment {
    /// Catalog index of the drawn pair.
    pub pair_index: usize,
    pub civilian: String,
    pub undercover: String,
}

impl WordAssignment {
    /// Word handed to a player of `role`; empty for Mr. White.
    #[must_use]
    pub fn word_for(&self, role: Role) -> &str {
        match role {
            Role::Civilian => &self.civilian,
            Role::Undercover => &self.undercover,
            Role::MrWhite => "",
        }
    }
}

/// Validated, non-empty list of word pairs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WordCatalog {
    pairs: Vec<WordPair>,
}

impl Default for WordCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl WordCatalog {
    /// Build a catalog, rejecting empty lists and malformed pairs.
    pub fn new(pairs: Vec<WordPair>) -> Result<Self, CatalogError> {
        if pairs.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (index, pair) in pairs.iter().enumerate() {
            pair.check(index)?;
        }
        Ok(Self { pairs })
    }

    /// The catalog shipped with the crate, embedded from
    /// `data/word_pairs.json` at build time.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_json_str(BUILTIN_CATALOG).expect("embedded word catalog is valid")
    }

    /// Parse a catalog from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let pairs: Vec<WordPair> = serde_json::from_str(json)?;
        Self::new(pairs)
    }

    /// Load a catalog from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Always false for a constructed catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&WordPair> {
        self.pairs.get(index)
    }

    /// Draw a pair not yet in `used` and flip which side the Civilians get.
    ///
    /// Once every index has been used the set is cleared and the whole
    /// catalog is available again. The drawn index is inserted into `used`.
    pub fn draw(&self, used: &mut FxHashSet<usize>, rng: &mut GameRng) -> WordAssignment {
        let mut available: Vec<usize> = (0..self.pairs.len()).filter(|i| !used.contains(i)).collect();
        if available.is_empty() {
            tracing::debug!(pairs = self.pairs.len(), "word catalog exhausted, reshuffling");
            used.clear();
            available = (0..self.pairs.len()).collect();
        }

        let pair_index = available[rng.gen_index(available.len())];
        used.insert(pair_index);

        let pair = &self.pairs[pair_index];
        let (civilian, undercover) = if rng.coin_flip() {
            (&pair.first, &pair.second)
        } else {
            (&pair.second, &pair.first)
        };
        tracing::debug!(pair_index, "drew word pair");

        WordAssignment {
            pair_index,
            civilian: civilian.clone(),
            undercover: undercover.clone(),
        }
    }
}
