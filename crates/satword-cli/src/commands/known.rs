//! Known-word management commands for CLI.

use chrono::Local;
use clap::Subcommand;
use satword_core::{DailyWord, Word};

use super::Session;

#[derive(Subcommand)]
pub enum KnownAction {
    /// List known words in the order they were marked
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Mark a word as known ("today" marks the current word of the day)
    Add {
        /// Word text, case-insensitive
        word: String,
    },
    /// Unmark a known word
    Remove {
        /// Word text, case-insensitive
        word: String,
    },
    /// Unmark every known word
    Clear,
}

pub fn run(action: KnownAction) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open()?;
    let store = session.known_store();

    match action {
        KnownAction::List { json } => {
            let known = store.get_known();
            if json {
                println!("{}", serde_json::to_string_pretty(known.words())?);
            } else if known.is_empty() {
                println!("No known words yet");
            } else {
                for word in &known {
                    println!("{}: {}", word.text, word.definition);
                }
            }
        }
        KnownAction::Add { word } => {
            let word = if word.eq_ignore_ascii_case("today") {
                let today = Local::now().date_naive();
                DailyWord::compute(&session.catalog, &store.get_known(), today)?.word
            } else {
                session
                    .catalog
                    .find_by_text(&word)
                    .cloned()
                    .ok_or_else(|| format!("word not in list: {word}"))?
            };
            if store.mark_known(&word)? {
                println!("Marked known: {}", word.text);
            } else {
                println!("Already known: {}", word.text);
            }
        }
        KnownAction::Remove { word } => {
            let target = find_known(&store.get_known(), &word)
                .or_else(|| session.catalog.find_by_text(&word).cloned());
            match target {
                Some(target) if store.remove_known(&target)? => {
                    println!("Removed: {}", target.text);
                }
                _ => println!("Not known: {word}"),
            }
        }
        KnownAction::Clear => {
            let removed = store.clear()?;
            println!("Removed {removed} known word(s)");
        }
    }
    Ok(())
}

/// Known words may have left the catalog, so look them up in the set first.
fn find_known(known: &satword_core::KnownWordSet, text: &str) -> Option<Word> {
    let needle = text.trim();
    known
        .iter()
        .find(|w| w.text.eq_ignore_ascii_case(needle))
        .cloned()
}
