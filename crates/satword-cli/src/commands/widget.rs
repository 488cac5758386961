//! Widget surface commands.
//!
//! These run in the widget's own process, invoked by whatever external
//! scheduler refreshes the widget. They read the known set but never
//! modify it.

use chrono::{DateTime, FixedOffset, Local};
use clap::Subcommand;
use satword_core::{WidgetEntry, WidgetSurface, WidgetTimelineScheduler};

use super::Session;

#[derive(Subcommand)]
pub enum WidgetAction {
    /// Current timeline and its refresh boundary
    Timeline {
        /// Evaluate at this instant (RFC 3339) instead of now
        #[arg(long)]
        now: Option<DateTime<FixedOffset>>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Fixed entry shown before data is available
    Placeholder {
        #[arg(long)]
        json: bool,
    },
    /// Entry for a gallery preview
    Snapshot {
        #[arg(long)]
        now: Option<DateTime<FixedOffset>>,
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: WidgetAction) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open()?;
    let scheduler = WidgetTimelineScheduler::from_config(&session.config.widget);
    let widget = WidgetSurface::new(&session.db, session.catalog.clone(), scheduler);

    match action {
        WidgetAction::Timeline { now, json } => {
            let now = now.unwrap_or_else(|| Local::now().fixed_offset());
            let rendered = widget.timeline(&now);
            if json {
                println!("{}", serde_json::to_string_pretty(&rendered)?);
            } else {
                for entry in &rendered.timeline.entries {
                    print_entry(entry);
                }
                println!("refresh at {}", rendered.timeline.refresh_at.to_rfc3339());
            }
        }
        WidgetAction::Placeholder { json } => {
            let entry = widget.placeholder(&Local::now());
            emit(&entry, json)?;
        }
        WidgetAction::Snapshot { now, json } => {
            let now = now.unwrap_or_else(|| Local::now().fixed_offset());
            let entry = widget.snapshot(&now);
            emit(&entry, json)?;
        }
    }
    Ok(())
}

fn emit(entry: &WidgetEntry, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(entry)?);
    } else {
        print_entry(entry);
    }
    Ok(())
}

fn print_entry(entry: &WidgetEntry) {
    println!(
        "{}  {}: {}",
        entry.effective_date.format("%Y-%m-%d"),
        entry.word.text,
        entry.word.definition
    );
}
