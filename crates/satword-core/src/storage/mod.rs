mod config;
pub mod database;

pub use config::{CatalogConfig, Config, DisplayConfig, WidgetConfig};
pub use database::Database;

use crate::error::DatabaseError;
use std::path::PathBuf;

/// Returns the shared data directory both surfaces read and write.
///
/// Resolution order:
/// - `SATWORD_DATA_DIR` if set
/// - `~/.config/satword-dev/` when `SATWORD_ENV=dev`
/// - `~/.config/satword/`
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("SATWORD_DATA_DIR") {
        Some(explicit) if !explicit.is_empty() => PathBuf::from(explicit),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("SATWORD_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("satword-dev")
            } else {
                base_dir.join("satword")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Durable key-value slots shared between the interactive and widget
/// surfaces.
///
/// Both surfaces hold a handle to the same store and re-read it on every
/// operation; nothing read from it is cached across invocations.
pub trait KvStore {
    /// Read a slot. `Ok(None)` when the slot was never written.
    fn get(&self, key: &str) -> Result<Option<String>, DatabaseError>;

    /// Overwrite a slot.
    fn set(&self, key: &str, value: &str) -> Result<(), DatabaseError>;

    /// Atomically read-modify-write a slot.
    ///
    /// `apply` receives the current value and returns the replacement, or
    /// `None` to leave the slot untouched. Returns whether a write happened.
    /// No other writer can interleave between the read and the write.
    fn update(
        &self,
        key: &str,
        apply: &mut dyn FnMut(Option<&str>) -> Option<String>,
    ) -> Result<bool, DatabaseError>;
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        (**self).set(key, value)
    }

    fn update(
        &self,
        key: &str,
        apply: &mut dyn FnMut(Option<&str>) -> Option<String>,
    ) -> Result<bool, DatabaseError> {
        (**self).update(key, apply)
    }
}

impl<T: KvStore + ?Sized> KvStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        (**self).set(key, value)
    }

    fn update(
        &self,
        key: &str,
        apply: &mut dyn FnMut(Option<&str>) -> Option<String>,
    ) -> Result<bool, DatabaseError> {
        (**self).update(key, apply)
    }
}
