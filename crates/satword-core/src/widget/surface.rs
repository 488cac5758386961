//! The widget process's side of the shared storage.
//!
//! The widget keeps its last computed timeline in a shared slot, tagged
//! with the invalidation generation and the catalog fingerprint it was
//! computed under. A cached timeline is reused only while it is unexpired,
//! for the same day, catalog and policy, and no newer invalidation has
//! been signalled. Anything else triggers a recomputation from current
//! state.

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use super::scheduler::{Timeline, WidgetEntry, WidgetTimelineScheduler};
use crate::catalog::WordCatalog;
use crate::error::SelectionError;
use crate::known::read_known;
use crate::signal::current_generation;
use crate::storage::KvStore;

/// Shared slot holding the widget's cached timeline.
pub const TIMELINE_CACHE_KEY: &str = "widget.timeline";

/// Where a timeline handed to the renderer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineSource {
    Cached,
    Computed,
    /// Nothing to select from; the placeholder is shown.
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceTimeline {
    pub source: TimelineSource,
    #[serde(flatten)]
    pub timeline: Timeline,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedTimeline {
    generation: u64,
    day: NaiveDate,
    /// [`WordCatalog::fingerprint`] of the list the timeline was drawn from.
    #[serde(default)]
    catalog: String,
    filter_known: bool,
    timeline: Timeline,
}

/// Widget surface over shared storage. Reads the known set, never writes it.
pub struct WidgetSurface<S> {
    store: S,
    catalog: WordCatalog,
    fingerprint: String,
    scheduler: WidgetTimelineScheduler,
}

impl<S: KvStore> WidgetSurface<S> {
    pub fn new(store: S, catalog: WordCatalog, scheduler: WidgetTimelineScheduler) -> Self {
        Self {
            store,
            fingerprint: catalog.fingerprint(),
            catalog,
            scheduler,
        }
    }

    /// Timeline to render at `now`. Never fails; an empty word list yields
    /// the placeholder timeline.
    pub fn timeline<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> SurfaceTimeline {
        let generation = current_generation(&self.store);
        let day = now.date_naive();

        if let Some(cached) = self.cached() {
            if cached.generation == generation
                && cached.day == day
                && cached.catalog == self.fingerprint
                && cached.filter_known == self.scheduler.filters_known()
                && !cached.timeline.is_expired(now)
            {
                tracing::debug!(generation, "serving cached widget timeline");
                return SurfaceTimeline {
                    source: TimelineSource::Cached,
                    timeline: cached.timeline,
                };
            }
        }

        match self.compute(now) {
            Ok(timeline) => {
                self.store_cache(&CachedTimeline {
                    generation,
                    day,
                    catalog: self.fingerprint.clone(),
                    filter_known: self.scheduler.filters_known(),
                    timeline: timeline.clone(),
                });
                SurfaceTimeline {
                    source: TimelineSource::Computed,
                    timeline,
                }
            }
            Err(SelectionError::EmptyList) => {
                tracing::warn!("no words available for the widget, showing placeholder");
                SurfaceTimeline {
                    source: TimelineSource::Placeholder,
                    timeline: Timeline::placeholder(now),
                }
            }
        }
    }

    /// Fixed entry rendered before any data is available.
    pub fn placeholder<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> WidgetEntry {
        WidgetEntry::placeholder(now)
    }

    /// Gallery preview entry from current state.
    pub fn snapshot<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> WidgetEntry {
        let known = read_known(&self.store);
        self.scheduler.snapshot(&self.catalog, &known, now)
    }

    fn compute<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<Timeline, SelectionError> {
        let known = read_known(&self.store);
        self.scheduler.get_timeline(&self.catalog, &known, now)
    }

    fn cached(&self) -> Option<CachedTimeline> {
        let raw = match self.store.get(TIMELINE_CACHE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "widget timeline cache unreadable");
                return None;
            }
        };
        serde_json::from_str(&raw)
            .map_err(|e| {
                tracing::warn!(error = %e, "discarding corrupt widget timeline cache");
            })
            .ok()
    }

    fn store_cache(&self, cached: &CachedTimeline) {
        let result = serde_json::to_string(cached)
            .map_err(|e| e.to_string())
            .and_then(|raw| {
                self.store
                    .set(TIMELINE_CACHE_KEY, &raw)
                    .map_err(|e| e.to_string())
            });
        if let Err(e) = result {
            tracing::warn!(error = %e, "widget timeline not cached");
        }
    }
}
