use chrono::{Local, NaiveDate};
use clap::Args;
use satword_core::{DailyWord, DayCursor, SelectionError};
use std::fmt::Write;

use super::Session;

#[derive(Args)]
pub struct TodayArgs {
    /// Date to show instead of today (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Days to step forward (positive) or back (negative) from the date
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    offset: i64,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

pub fn run(args: TodayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open()?;
    let known = session.known_store().get_known();

    let mut cursor = DayCursor::new(args.date.unwrap_or_else(|| Local::now().date_naive()));
    cursor.shift(args.offset);

    match cursor.current(&session.catalog, &known) {
        Ok(daily) => print_daily(&daily, &session.config.display.date_format, args.json)?,
        Err(SelectionError::EmptyList) => {
            if args.json {
                println!("null");
            } else if session.catalog.is_empty() {
                println!("Loading...");
            } else {
                println!("No words left: every word in the list is marked known.");
            }
        }
    }
    Ok(())
}

fn print_daily(
    daily: &DailyWord,
    date_format: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(daily)?);
    } else {
        let mut heading = String::new();
        if write!(heading, "{}", daily.date.format(date_format)).is_err() {
            heading = daily.date.to_string();
        }
        println!("{heading}");
        println!();
        println!("{}", daily.word.text);
        println!("  {}", daily.word.definition);
    }
    Ok(())
}
