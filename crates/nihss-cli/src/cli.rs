use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nihss_instruments::scoring::ScoreEntry;

use crate::config::ReportFormat;

#[derive(Parser, Debug)]
#[command(name = "nihss", version, about = "NIH Stroke Scale calculator")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, global = true, help = "Emit logs as JSON lines on stderr")]
    pub log_json: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every item and its options.
    Items,
    /// Score a set of selections and print the total.
    Score {
        #[arg(short = 's', long = "set", value_name = "ITEM=VALUE", value_parser = parse_entry)]
        selections: Vec<ScoreEntry>,
    },
    /// Render the clinical note and write it to a file.
    Report {
        #[arg(short = 's', long = "set", value_name = "ITEM=VALUE", value_parser = parse_entry)]
        selections: Vec<ScoreEntry>,
        #[arg(long, default_value = "")]
        patient_id: String,
        #[arg(long)]
        assessor: Option<String>,
        #[arg(long, help = "Directory to write the note into")]
        out: Option<PathBuf>,
        #[arg(long, value_enum)]
        format: Option<ReportFormat>,
        #[arg(long, default_value_t = false, help = "Print the note instead of writing it")]
        stdout: bool,
    },
    /// Walk through the items interactively on stdin.
    Assess {
        #[arg(long)]
        patient_id: Option<String>,
        #[arg(long)]
        assessor: Option<String>,
        #[arg(long, help = "Also write the note into this directory")]
        out: Option<PathBuf>,
    },
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    Show,
    Set {
        #[arg(long)]
        assessor: Option<String>,
        #[arg(long)]
        output_dir: Option<PathBuf>,
        #[arg(long, value_enum)]
        format: Option<ReportFormat>,
    },
    Reset,
}

/// Parse `ITEM=VALUE`, where VALUE is a point value or `UN`.
pub fn parse_entry(raw: &str) -> Result<ScoreEntry, String> {
    let (item_id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ITEM=VALUE, got '{raw}'"))?;
    let item_id = item_id.trim();
    let value = value.trim();
    if item_id.is_empty() {
        return Err(format!("missing item id in '{raw}'"));
    }
    if value.eq_ignore_ascii_case("un") {
        return Ok(ScoreEntry::untestable(item_id));
    }
    let points = value
        .parse::<u8>()
        .map_err(|_| format!("'{value}' is not a point value or UN"))?;
    Ok(ScoreEntry::points(item_id, points))
}
