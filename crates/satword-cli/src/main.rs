use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "satword", version, about = "SATWord: one vocabulary word a day")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the word of the day
    Today(commands::today::TodayArgs),
    /// Manage words marked as known
    Known {
        #[command(subcommand)]
        action: commands::known::KnownAction,
    },
    /// Inspect the word list
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Widget surface: timelines for passive display
    Widget {
        #[command(subcommand)]
        action: commands::widget::WidgetAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("SATWORD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Today(args) => commands::today::run(args),
        Commands::Known { action } => commands::known::run(action),
        Commands::Catalog { action } => commands::catalog::run(action),
        Commands::Widget { action } => commands::widget::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
