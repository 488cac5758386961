//! Persistence of the words the user has marked as known.
//!
//! The known set lives in one shared key-value slot as a JSON array of
//! `{"word", "definition"}` records. Reads never fail: absent, empty or
//! corrupt state reads as an empty set. Mutations are idempotent, happen
//! inside a single storage transaction, and emit a [`SyncSignal`] only when
//! they actually changed the set.
//!
//! Two processes racing to mark and unmark the *same* word end with
//! whichever transaction committed last. Mutations of different words never
//! lose each other's updates.

use chrono::Utc;
use std::collections::HashMap;

use crate::error::{CoreError, StoreError};
use crate::events::Event;
use crate::signal::SyncSignal;
use crate::storage::KvStore;
use crate::word::{Word, WordId};

/// Shared slot holding the known set.
pub const KNOWN_WORDS_KEY: &str = "known_words";

/// Set of known words keyed by [`WordId`], iterated in the order they were
/// marked known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownWordSet {
    order: Vec<Word>,
    index: HashMap<WordId, usize>,
}

impl KnownWordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.index.contains_key(&word.id())
    }

    pub fn contains_id(&self, id: &WordId) -> bool {
        self.index.contains_key(id)
    }

    /// Returns `false` if the word was already present.
    pub fn insert(&mut self, word: Word) -> bool {
        let id = word.id();
        if self.index.contains_key(&id) {
            return false;
        }
        self.index.insert(id, self.order.len());
        self.order.push(word);
        true
    }

    /// Returns `false` if the word was absent.
    pub fn remove(&mut self, word: &Word) -> bool {
        let Some(pos) = self.index.remove(&word.id()) else {
            return false;
        };
        self.order.remove(pos);
        for slot in self.index.values_mut() {
            if *slot > pos {
                *slot -= 1;
            }
        }
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Word> {
        self.order.iter()
    }

    pub fn words(&self) -> &[Word] {
        &self.order
    }

    /// Decode the persisted form. Duplicate records collapse to one.
    pub fn decode(raw: &str) -> Result<Self, StoreError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let words: Vec<Word> =
            serde_json::from_str(raw).map_err(|e| StoreError::Corrupt {
                key: KNOWN_WORDS_KEY.to_string(),
                message: e.to_string(),
            })?;
        Ok(words.into_iter().collect())
    }

    /// Encode to the persisted form.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.order)
    }
}

impl FromIterator<Word> for KnownWordSet {
    fn from_iter<I: IntoIterator<Item = Word>>(iter: I) -> Self {
        let mut set = Self::default();
        for word in iter {
            set.insert(word);
        }
        set
    }
}

impl<'a> IntoIterator for &'a KnownWordSet {
    type Item = &'a Word;
    type IntoIter = std::slice::Iter<'a, Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

/// Read-only view of the persisted known set, for surfaces that never
/// mutate it. Absent, empty or corrupt state reads as empty.
pub fn read_known<S: KvStore>(store: &S) -> KnownWordSet {
    match store.get(KNOWN_WORDS_KEY) {
        Ok(None) => KnownWordSet::default(),
        Ok(Some(raw)) => KnownWordSet::decode(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "known words unreadable, treating as empty");
            KnownWordSet::default()
        }),
        Err(e) => {
            tracing::warn!(error = %e, "known words storage failed, treating as empty");
            KnownWordSet::default()
        }
    }
}

/// Known-word persistence over shared storage.
///
/// Holds only handles to the store and the signal; every call re-reads the
/// persisted state.
pub struct KnownWordStore<S, N> {
    store: S,
    signal: N,
}

impl<S: KvStore, N: SyncSignal> KnownWordStore<S, N> {
    pub fn new(store: S, signal: N) -> Self {
        Self { store, signal }
    }

    /// Current known set. Absent, empty or corrupt state reads as empty.
    pub fn get_known(&self) -> KnownWordSet {
        read_known(&self.store)
    }

    pub fn is_known(&self, word: &Word) -> bool {
        self.get_known().contains(word)
    }

    /// Mark `word` known. Returns whether the set changed.
    ///
    /// # Errors
    /// Storage failures while writing. A corrupt persisted set is replaced.
    pub fn mark_known(&self, word: &Word) -> Result<bool, CoreError> {
        let changed = self.mutate(|set| set.insert(word.clone()))?;
        if changed {
            tracing::info!(word = %word.text, "marked known");
            self.signal.notify_changed(&Event::WordMarkedKnown {
                word: word.clone(),
                at: Utc::now(),
            });
        }
        Ok(changed)
    }

    /// Remove `word` from the known set. Returns whether the set changed.
    ///
    /// # Errors
    /// Storage failures while writing.
    pub fn remove_known(&self, word: &Word) -> Result<bool, CoreError> {
        let changed = self.mutate(|set| set.remove(word))?;
        if changed {
            tracing::info!(word = %word.text, "unmarked known");
            self.signal.notify_changed(&Event::WordUnmarked {
                word: word.clone(),
                at: Utc::now(),
            });
        }
        Ok(changed)
    }

    /// Forget every known word. Returns how many were removed.
    pub fn clear(&self) -> Result<usize, CoreError> {
        let mut removed = 0;
        self.mutate(|set| {
            removed = set.len();
            *set = KnownWordSet::default();
            removed > 0
        })?;
        if removed > 0 {
            tracing::info!(removed, "cleared known words");
            self.signal.notify_changed(&Event::KnownSetCleared {
                removed,
                at: Utc::now(),
            });
        }
        Ok(removed)
    }

    /// Apply `change` to the persisted set in one transaction. `change`
    /// returns whether it modified the set; nothing is written otherwise.
    fn mutate(&self, mut change: impl FnMut(&mut KnownWordSet) -> bool) -> Result<bool, CoreError> {
        let mut encode_error = None;
        let wrote = self.store.update(KNOWN_WORDS_KEY, &mut |current| {
            let mut set = current
                .map(|raw| {
                    KnownWordSet::decode(raw).unwrap_or_else(|e| {
                        tracing::warn!(error = %e, "overwriting corrupt known words");
                        KnownWordSet::default()
                    })
                })
                .unwrap_or_default();
            if !change(&mut set) {
                return None;
            }
            match set.encode() {
                Ok(encoded) => Some(encoded),
                Err(e) => {
                    encode_error = Some(e);
                    None
                }
            }
        })?;
        if let Some(e) = encode_error {
            return Err(e.into());
        }
        Ok(wrote)
    }
}
