use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::constants::DEFAULT_SAMPLE_ROWS;

#[derive(Parser)]
#[command(name = "meteorite-sorter")]
#[command(about = "Sort NASA meteorite landings into per-region SQLite tables")]
#[command(version)]
pub struct Cli {
    /// Defaults to `load` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase log verbosity (-v debug, -vv trace)")]
    pub verbose: u8,

    #[arg(short, long, global = true, help = "Only log errors and hide progress")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Config file (TOML, JSON or YAML)")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the dataset and rebuild the region tables
    Load(LoadArgs),

    /// List the regions and their bounding boxes
    Regions,

    /// Show row counts for each region table
    Info {
        #[arg(short, long, help = "SQLite database [default: meteorite_db.db]")]
        database: Option<PathBuf>,

        #[arg(short, long, default_value_t = DEFAULT_SAMPLE_ROWS, help = "Sample rows to show per region (0 = none)")]
        sample: usize,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct LoadArgs {
    #[arg(long, help = "Dataset URL [default: NASA Meteorite Landings endpoint]")]
    pub source_url: Option<String>,

    #[arg(
        short,
        long,
        conflicts_with = "source_url",
        help = "Read the dataset from a local JSON file instead of fetching it"
    )]
    pub input_file: Option<PathBuf>,

    #[arg(short, long, help = "SQLite database [default: meteorite_db.db]")]
    pub database: Option<PathBuf>,

    #[arg(long, help = "Skip records with non-numeric coordinates instead of aborting")]
    pub skip_malformed: bool,

    #[arg(long, help = "Classify without writing to the database")]
    pub dry_run: bool,

    #[arg(long, help = "Print the load report as JSON")]
    pub json: bool,
}
