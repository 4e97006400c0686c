use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "roza",
    version,
    author,
    about = "Sehar and Iftar countdown for Bangladeshi cities"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show today's Sehar/Iftar times and the current countdown
    Times {
        /// Evaluate at this local time instead of now (e.g. 2026-03-05T04:00)
        #[arg(long, value_parser = parse_local_datetime)]
        at: Option<NaiveDateTime>,
    },
    /// Print the Ramadan timetable for the configured city
    Calendar {
        /// Hijri year (defaults to the current one)
        #[arg(long)]
        year: Option<u32>,
    },
    /// Show the available cities, or switch to one
    City {
        /// City name, e.g. Sylhet
        name: Option<String>,
    },
    /// Set the display language
    Lang {
        /// bn or en
        lang: String,
    },
    /// Drop cached calendars for the configured city and fetch again
    Refresh,
}

fn parse_local_datetime(s: &str) -> Result<NaiveDateTime, String> {
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| format!("expected YYYY-MM-DDTHH:MM, got '{}'", s))
}
