use clap::Subcommand;

use super::Session;

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List every word in catalog order
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Number of words in the catalog
    Count,
}

pub fn run(action: CatalogAction) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open()?;

    match action {
        CatalogAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(session.catalog.words())?);
            } else {
                for (index, word) in session.catalog.iter().enumerate() {
                    println!("{index:>4}  {}: {}", word.text, word.definition);
                }
            }
        }
        CatalogAction::Count => {
            println!("{}", session.catalog.len());
        }
    }
    Ok(())
}
