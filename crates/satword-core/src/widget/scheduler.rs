//! Timeline computation for the passive widget surface.
//!
//! A timeline holds one entry for the current local date and declares the
//! next local midnight as its refresh boundary. Entries are stamped with
//! the start of their day rather than the instant of the call, so every
//! call within one day yields an identical timeline.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::active::ActiveWordList;
use crate::catalog::WordCatalog;
use crate::error::SelectionError;
use crate::known::KnownWordSet;
use crate::storage::WidgetConfig;
use crate::word::Word;

const PLACEHOLDER_TEXT: &str = "Placeholder";
const PLACEHOLDER_DEFINITION: &str = "A temporary replacement";

/// A (date, word) pair shown until the timeline's refresh boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetEntry {
    /// Local midnight starting the day this entry describes.
    pub effective_date: DateTime<FixedOffset>,
    pub word: Word,
    /// Set only on the fixed entry shown before data is available, never
    /// inferred from the word itself.
    #[serde(default)]
    pub placeholder: bool,
}

impl WidgetEntry {
    /// Fixed entry rendered before any data is available.
    pub fn placeholder<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self {
            effective_date: day_start(now),
            word: Word::new(PLACEHOLDER_TEXT, PLACEHOLDER_DEFINITION),
            placeholder: true,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }
}

/// Entries plus the instant after which the widget must ask again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub entries: Vec<WidgetEntry>,
    pub refresh_at: DateTime<FixedOffset>,
}

impl Timeline {
    /// Timeline holding only the placeholder, refreshed at the next midnight.
    pub fn placeholder<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self {
            entries: vec![WidgetEntry::placeholder(now)],
            refresh_at: next_local_midnight(now),
        }
    }

    /// Entry to display right now.
    pub fn current(&self) -> Option<&WidgetEntry> {
        self.entries.first()
    }

    pub fn is_expired<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        now.fixed_offset() >= self.refresh_at
    }
}

/// Builds widget timelines under a known-word filtering policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetTimelineScheduler {
    filter_known: bool,
}

impl Default for WidgetTimelineScheduler {
    fn default() -> Self {
        Self { filter_known: true }
    }
}

impl WidgetTimelineScheduler {
    /// With `filter_known` the widget selects from the same active list as
    /// the interactive surface; without it, from the full catalog.
    pub fn new(filter_known: bool) -> Self {
        Self { filter_known }
    }

    pub fn from_config(config: &WidgetConfig) -> Self {
        Self::new(config.filter_known)
    }

    pub fn filters_known(&self) -> bool {
        self.filter_known
    }

    /// Timeline for `now`.
    ///
    /// # Errors
    /// `SelectionError::EmptyList` when there is nothing to select from;
    /// render [`Timeline::placeholder`] instead.
    pub fn get_timeline<Tz: TimeZone>(
        &self,
        catalog: &WordCatalog,
        known: &KnownWordSet,
        now: &DateTime<Tz>,
    ) -> Result<Timeline, SelectionError> {
        let known = self.filter_known.then_some(known);
        get_timeline(catalog, known, now)
    }

    /// Entry for a gallery preview: today's entry when available, the
    /// placeholder otherwise.
    pub fn snapshot<Tz: TimeZone>(
        &self,
        catalog: &WordCatalog,
        known: &KnownWordSet,
        now: &DateTime<Tz>,
    ) -> WidgetEntry {
        self.get_timeline(catalog, known, now)
            .ok()
            .and_then(|t| t.entries.into_iter().next())
            .unwrap_or_else(|| WidgetEntry::placeholder(now))
    }
}

/// Timeline for `now`, filtering `catalog` against `known` when given.
///
/// # Errors
/// `SelectionError::EmptyList` when the (filtered) list is empty.
pub fn get_timeline<Tz: TimeZone>(
    catalog: &WordCatalog,
    known: Option<&KnownWordSet>,
    now: &DateTime<Tz>,
) -> Result<Timeline, SelectionError> {
    let list = match known {
        Some(known) => ActiveWordList::build(catalog, known),
        None => ActiveWordList::unfiltered(catalog),
    };
    let word = list.select(now.date_naive())?.clone();
    Ok(Timeline {
        entries: vec![WidgetEntry {
            effective_date: day_start(now),
            word,
            placeholder: false,
        }],
        refresh_at: next_local_midnight(now),
    })
}

/// The first instant of the local day after `now`.
///
/// Where a DST transition skips midnight, the first valid local time after
/// it is used.
pub fn next_local_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<FixedOffset> {
    now.date_naive()
        .succ_opt()
        .and_then(|tomorrow| start_of_day(&now.timezone(), tomorrow))
        .or_else(|| now.clone().checked_add_signed(Duration::days(1)))
        .unwrap_or_else(|| now.clone())
        .fixed_offset()
}

fn day_start<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<FixedOffset> {
    start_of_day(&now.timezone(), now.date_naive())
        .unwrap_or_else(|| now.clone())
        .fixed_offset()
}

fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<DateTime<Tz>> {
    let midnight = date.and_time(NaiveTime::MIN);
    // Gaps are at most a few hours; scan forward in quarter hours.
    (0..=96).find_map(|quarter| {
        let candidate = midnight.checked_add_signed(Duration::minutes(15 * quarter))?;
        tz.from_local_datetime(&candidate).earliest()
    })
}
