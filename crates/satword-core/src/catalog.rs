//! The ordered, immutable list of candidate words.
//!
//! Order matters: it is the domain over which day-of-year indexing runs.
//! A missing or malformed resource degrades to an empty catalog.

use sha2::{Digest, Sha256};
use std::path::Path;
use std::sync::OnceLock;

use crate::error::CatalogError;
use crate::storage::Config;
use crate::word::Word;

const BUNDLED_WORDS: &str = include_str!("../data/sat_words.json");

static BUNDLED: OnceLock<WordCatalog> = OnceLock::new();

/// Ordered list of every word that can be shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordCatalog {
    words: Vec<Word>,
}

impl WordCatalog {
    pub fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    /// Decode a JSON array of `{"word", "definition"}` records.
    pub fn from_json(bytes: &[u8]) -> Result<Self, CatalogError> {
        let words: Vec<Word> = serde_json::from_slice(bytes)?;
        Ok(Self { words })
    }

    /// Read and decode a word list file.
    ///
    /// # Errors
    /// `CatalogError::Missing` if the file cannot be read,
    /// `CatalogError::Malformed` if it does not decode.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let bytes = std::fs::read(path).map_err(|source| CatalogError::Missing {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&bytes)
    }

    /// Like [`WordCatalog::load`], but any failure yields an empty catalog.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalog) => {
                tracing::debug!(path = %path.display(), words = catalog.len(), "loaded word list");
                catalog
            }
            Err(e) => {
                tracing::warn!(error = %e, "word list unavailable, using empty catalog");
                Self::default()
            }
        }
    }

    /// The word list compiled into the library, decoded once per process.
    pub fn bundled() -> &'static WordCatalog {
        BUNDLED.get_or_init(|| {
            Self::from_json(BUNDLED_WORDS.as_bytes()).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "bundled word list is malformed");
                Self::default()
            })
        })
    }

    /// Pick the catalog named by configuration, falling back to the bundled one.
    pub fn resolve(config: &Config) -> Self {
        match config.catalog.path.as_deref() {
            Some(path) => Self::load_or_empty(Path::new(path)),
            None => Self::bundled().clone(),
        }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Word> {
        self.words.iter()
    }

    /// Hex SHA-256 over the ordered word ids.
    ///
    /// Changes whenever a word is added, removed, edited or reordered, all
    /// of which can move the word of the day.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for word in &self.words {
            hasher.update(word.id().as_str().as_bytes());
        }
        hex::encode(hasher.finalize())
    }

    /// Case-insensitive lookup by word text; first match in catalog order.
    pub fn find_by_text(&self, text: &str) -> Option<&Word> {
        let needle = text.trim();
        self.words
            .iter()
            .find(|w| w.text.eq_ignore_ascii_case(needle))
    }
}

impl<'a> IntoIterator for &'a WordCatalog {
    type Item = &'a Word;
    type IntoIter = std::slice::Iter<'a, Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}
