//! Word of the day for the interactive surface, with day-by-day navigation.
//!
//! Navigation only ever moves a calendar date. The word for the resulting
//! date is recomputed from the current catalog and known set on every
//! lookup, so marking a word known while browsing another day can never
//! leave a stale index pointing past the end of the shrunken list.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::active::ActiveWordList;
use crate::catalog::WordCatalog;
use crate::error::SelectionError;
use crate::known::KnownWordSet;
use crate::word::Word;

/// The word shown for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyWord {
    pub date: NaiveDate,
    /// Anchor into the active list the word was selected from.
    pub index: usize,
    /// Length of that active list.
    pub active_len: usize,
    pub word: Word,
}

impl DailyWord {
    /// Select the word for `date` from the catalog minus `known`.
    ///
    /// # Errors
    /// `SelectionError::EmptyList` when every word is known or the catalog
    /// is empty; show an empty/loading state instead.
    pub fn compute(
        catalog: &WordCatalog,
        known: &KnownWordSet,
        date: NaiveDate,
    ) -> Result<Self, SelectionError> {
        Self::from_active(&ActiveWordList::build(catalog, known), date)
    }

    pub fn from_active(active: &ActiveWordList, date: NaiveDate) -> Result<Self, SelectionError> {
        let index = active.select_index(date)?;
        Ok(Self {
            date,
            index,
            active_len: active.len(),
            word: active.words()[index].clone(),
        })
    }
}

/// The date currently displayed by the interactive surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCursor {
    today: NaiveDate,
    date: NaiveDate,
}

impl DayCursor {
    pub fn new(today: NaiveDate) -> Self {
        Self { today, date: today }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Days between the displayed date and today; negative in the past.
    pub fn offset(&self) -> i64 {
        (self.date - self.today).num_days()
    }

    pub fn previous(&mut self) -> NaiveDate {
        self.shift(-1)
    }

    pub fn next(&mut self) -> NaiveDate {
        self.shift(1)
    }

    /// Move by `days`; saturates at the calendar range chrono supports.
    pub fn shift(&mut self, days: i64) -> NaiveDate {
        if let Some(moved) = Duration::try_days(days).and_then(|d| self.date.checked_add_signed(d)) {
            self.date = moved;
        }
        self.date
    }

    pub fn reset(&mut self) -> NaiveDate {
        self.date = self.today;
        self.date
    }

    /// Word for the displayed date against the current state.
    pub fn current(
        &self,
        catalog: &WordCatalog,
        known: &KnownWordSet,
    ) -> Result<DailyWord, SelectionError> {
        DailyWord::compute(catalog, known, self.date)
    }
}
