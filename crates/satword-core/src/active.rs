//! The catalog with known words filtered out.

use chrono::NaiveDate;
use std::collections::HashSet;

use crate::catalog::WordCatalog;
use crate::error::SelectionError;
use crate::known::KnownWordSet;
use crate::selector;
use crate::word::{Word, WordId};

/// Catalog words not in the known set, in catalog order.
///
/// Derived and ephemeral: rebuild it whenever the catalog or the known set
/// may have changed instead of patching an old one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveWordList {
    words: Vec<Word>,
}

impl ActiveWordList {
    /// Filter `catalog` against `known`. O(n) in the catalog size.
    pub fn build(catalog: &WordCatalog, known: &KnownWordSet) -> Self {
        let excluded: HashSet<WordId> = known.iter().map(Word::id).collect();
        let words: Vec<Word> = catalog
            .iter()
            .filter(|w| !excluded.contains(&w.id()))
            .cloned()
            .collect();
        tracing::debug!(
            catalog = catalog.len(),
            known = known.len(),
            active = words.len(),
            "built active word list"
        );
        Self { words }
    }

    /// The full catalog, used where no known-word filtering applies.
    pub fn unfiltered(catalog: &WordCatalog) -> Self {
        Self {
            words: catalog.words().to_vec(),
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

    /// Anchor index for `date` in this list.
    pub fn select_index(&self, date: NaiveDate) -> Result<usize, SelectionError> {
        selector::select_index(&self.words, date)
    }

    /// Word for `date` in this list.
    pub fn select(&self, date: NaiveDate) -> Result<&Word, SelectionError> {
        selector::select(&self.words, date)
    }
}
