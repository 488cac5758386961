//! # SATWord Core Library
//!
//! This library provides the core logic for SATWord, which shows one
//! vocabulary word per day, remembers which words the user already knows,
//! and keeps a passive widget surface showing the same word as the
//! interactive one. The CLI binary is a thin layer over this crate; the
//! interactive and widget surfaces run as separate processes that share
//! only a SQLite database.
//!
//! ## Architecture
//!
//! - **Catalog**: The ordered, immutable word list, bundled or from disk
//! - **Known words**: Persisted known set with idempotent mutations
//! - **Selection**: Day-of-year anchor into the active (unknown) word list
//! - **Widget**: Timeline computation with a midnight refresh boundary and a
//!   cache that honors invalidation signals from the interactive surface
//! - **Storage**: Shared key-value slots and TOML configuration
//!
//! ## Key Components
//!
//! - [`WordCatalog`]: Word list loading
//! - [`KnownWordStore`]: Known-word persistence
//! - [`select_index`]: Word-of-the-day anchor
//! - [`ActiveWordList`]: Catalog minus known words
//! - [`WidgetTimelineScheduler`]: Widget timeline computation
//! - [`SyncSignal`]: Cross-surface invalidation

pub mod active;
pub mod catalog;
pub mod daily;
pub mod error;
pub mod events;
pub mod known;
pub mod selector;
pub mod signal;
pub mod storage;
pub mod widget;
pub mod word;

pub use active::ActiveWordList;
pub use catalog::WordCatalog;
pub use daily::{DailyWord, DayCursor};
pub use error::{CatalogError, ConfigError, CoreError, DatabaseError, SelectionError, StoreError};
pub use events::Event;
pub use known::{read_known, KnownWordSet, KnownWordStore};
pub use selector::{day_of_year, select_index};
pub use signal::{KvSyncSignal, NoopSignal, SyncSignal};
pub use storage::{Config, Database, KvStore};
pub use widget::{
    SurfaceTimeline, Timeline, TimelineSource, WidgetEntry, WidgetSurface,
    WidgetTimelineScheduler,
};
pub use word::{Word, WordId};
