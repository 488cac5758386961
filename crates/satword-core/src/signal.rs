//! One-way invalidation signal from the interactive surface to the widget.
//!
//! Signals are fire-and-forget: no acknowledgement, no retry. A dropped
//! signal leaves the widget showing a stale word until its next midnight
//! refresh, which bounds the staleness.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::storage::KvStore;

/// Shared slot holding the latest invalidation request.
pub const INVALIDATION_KEY: &str = "widget.invalidation";

/// Receiver of known-set change notifications.
pub trait SyncSignal {
    /// Ask the widget surface to discard any timeline computed before now.
    /// Must not fail and must not block on the receiver.
    fn notify_changed(&self, event: &Event);
}

impl<T: SyncSignal + ?Sized> SyncSignal for &T {
    fn notify_changed(&self, event: &Event) {
        (**self).notify_changed(event)
    }
}

/// Drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSignal;

impl SyncSignal for NoopSignal {
    fn notify_changed(&self, _event: &Event) {}
}

/// Invalidation record written to shared storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invalidation {
    /// Strictly increasing across signals.
    pub generation: u64,
    pub requested_at: DateTime<Utc>,
    pub cause: Event,
}

/// Read the current invalidation generation; 0 when none was ever written
/// or the slot is unreadable.
pub fn current_generation<S: KvStore>(store: &S) -> u64 {
    read_invalidation(store).map_or(0, |inv| inv.generation)
}

/// Read the latest invalidation record, if a readable one exists.
pub fn read_invalidation<S: KvStore>(store: &S) -> Option<Invalidation> {
    let raw = match store.get(INVALIDATION_KEY) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!(error = %e, "invalidation slot unreadable");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(inv) => Some(inv),
        Err(e) => {
            tracing::warn!(error = %e, "invalidation slot corrupt, treating as absent");
            None
        }
    }
}

/// Signals the widget by bumping the invalidation record in shared storage.
pub struct KvSyncSignal<S> {
    store: S,
}

impl<S: KvStore> KvSyncSignal<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KvStore> SyncSignal for KvSyncSignal<S> {
    fn notify_changed(&self, event: &Event) {
        let result = self.store.update(INVALIDATION_KEY, &mut |current| {
            let previous = current
                .and_then(|raw| serde_json::from_str::<Invalidation>(raw).ok())
                .map_or(0, |inv| inv.generation);
            let next = Invalidation {
                generation: previous + 1,
                requested_at: Utc::now(),
                cause: event.clone(),
            };
            serde_json::to_string(&next).ok()
        });

        match result {
            Ok(true) => tracing::debug!("widget timeline invalidated"),
            Ok(false) => tracing::warn!("invalidation record could not be encoded, signal dropped"),
            Err(e) => tracing::warn!(error = %e, "widget invalidation dropped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;
    use crate::word::Word;

    fn marked(text: &str) -> Event {
        Event::WordMarkedKnown {
            word: Word::new(text, "definition"),
            at: Utc::now(),
        }
    }

    #[test]
    fn generation_starts_at_zero() {
        let db = Database::open_memory().unwrap();
        assert_eq!(current_generation(&db), 0);
        assert!(read_invalidation(&db).is_none());
    }

    #[test]
    fn each_signal_bumps_generation() {
        let db = Database::open_memory().unwrap();
        let signal = KvSyncSignal::new(&db);

        signal.notify_changed(&marked("Laconic"));
        assert_eq!(current_generation(&db), 1);

        signal.notify_changed(&marked("Ebullient"));
        let inv = read_invalidation(&db).unwrap();
        assert_eq!(inv.generation, 2);
        assert!(matches!(
            inv.cause,
            Event::WordMarkedKnown { ref word, .. } if word.text == "Ebullient"
        ));
    }

    #[test]
    fn corrupt_record_restarts_generation() {
        let db = Database::open_memory().unwrap();
        db.kv_set(INVALIDATION_KEY, "{broken").unwrap();
        assert_eq!(current_generation(&db), 0);

        KvSyncSignal::new(&db).notify_changed(&marked("Laconic"));
        assert_eq!(current_generation(&db), 1);
    }

    #[test]
    fn noop_signal_writes_nothing() {
        let db = Database::open_memory().unwrap();
        NoopSignal.notify_changed(&marked("Laconic"));
        assert_eq!(current_generation(&db), 0);
    }
}
