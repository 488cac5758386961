use clap::Subcommand;
use satword_core::{Config, ConfigError, WordCatalog};
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "widget.filter_known", "catalog.path")
        key: String,
    },
    /// Set a config value (an empty value clears an optional key)
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config.get(&key).ok_or(ConfigError::UnknownKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            if key == "catalog.path" {
                // Both surfaces pick the new list up on their next run.
                println!("ok: {}", describe_catalog(&config));
            } else {
                println!("ok");
            }
        }
        ConfigAction::List => {
            let config = Config::load()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            println!("config reset to defaults: {}", describe_catalog(&config));
        }
    }
    Ok(())
}

/// Which word list `config` selects and how many words it yields.
fn describe_catalog(config: &Config) -> String {
    match config.catalog.path.as_deref() {
        None => format!("bundled word list, {} words", WordCatalog::bundled().len()),
        Some(path) => match WordCatalog::load(Path::new(path)) {
            Ok(catalog) => format!("{} words from {path}", catalog.len()),
            Err(e) => format!("{e}; nothing to show until the word list is fixed"),
        },
    }
}
