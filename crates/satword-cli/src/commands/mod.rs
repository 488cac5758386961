pub mod catalog;
pub mod config;
pub mod known;
pub mod today;
pub mod widget;

use satword_core::{Config, Database, KnownWordStore, KvSyncSignal, WordCatalog};

/// Everything one CLI invocation needs: configuration, the catalog chosen
/// by it, and a connection to the shared database.
pub struct Session {
    pub config: Config,
    pub catalog: WordCatalog,
    pub db: Database,
}

impl Session {
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load_or_default();
        let catalog = WordCatalog::resolve(&config);
        let db = Database::open()?;
        Ok(Self {
            config,
            catalog,
            db,
        })
    }

    /// Known-word store that signals the widget on every change.
    pub fn known_store(&self) -> KnownWordStore<&Database, KvSyncSignal<&Database>> {
        KnownWordStore::new(&self.db, KvSyncSignal::new(&self.db))
    }
}
