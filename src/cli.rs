use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

use crate::agenda::DEFAULT_HORIZON_DAYS;

/// CLI arguments for taskdue
#[derive(Parser)]
#[command(name = "taskdue")]
#[command(about = "Resolve due-date expressions and order stored tasks by urgency")]
#[command(version)]
pub struct Cli {
    /// JSON file of stored task rows
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// View: list, urgent, today, remind
    #[arg(long, default_value = "list", value_parser = ["list", "urgent", "today", "remind"])]
    pub mode: String,

    /// Resolve a due-date expression and print its stored form
    #[arg(long)]
    pub resolve: Option<String>,

    /// Output format: json, md
    #[arg(long, default_value = "json", value_parser = ["json", "md"])]
    pub format: String,

    /// Output file path (stdout if not specified)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Timezone that anchors "today" (IANA timezone, e.g. "Asia/Tokyo")
    #[arg(long, default_value = "Asia/Tokyo")]
    pub tz: String,

    /// Fixed date to use as "today" (YYYY-MM-DD)
    #[arg(long, value_parser = validate_date)]
    pub date: Option<String>,

    /// Reminder horizon in days for 'remind' mode
    #[arg(long, default_value_t = DEFAULT_HORIZON_DAYS)]
    pub horizon: i64,
}

/// Validate date format (YYYY-MM-DD)
fn validate_date(s: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|_| s.to_string())
        .map_err(|e| format!("Invalid date '{s}': {e}. Use YYYY-MM-DD format"))
}
