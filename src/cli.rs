//! Command-line interface definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// dailytrack - personal weight and food tracking over flat CSV files
#[derive(Parser)]
#[command(name = "dailytrack", version, about)]
pub struct Cli {
    /// Data directory (overrides DAILYTRACK_DATA_DIR)
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub tracker: Tracker,
}

#[derive(Subcommand)]
pub enum Tracker {
    /// Weight tracker
    #[command(subcommand)]
    Weight(WeightCmd),

    /// Food tracker
    #[command(subcommand)]
    Food(FoodCmd),
}

#[derive(Subcommand)]
pub enum WeightCmd {
    /// Record or update the weight for a date (e.g. 62kg or 143lb)
    Add {
        /// Date, YYYY-MM-DD
        date: String,
        /// Weight with unit, e.g. 62kg or 143lb
        weight: String,
    },

    /// Delete the entry for a date
    Remove {
        /// Date, YYYY-MM-DD
        date: String,
    },

    /// Print the weight history and refresh the chart
    History,
}

#[derive(Subcommand)]
pub enum FoodCmd {
    /// List catalog products
    List,

    /// Add a product to the catalog
    AddProduct {
        /// Short unique id, e.g. bread
        id: String,
        /// Display name, e.g. "Pain de mie"
        name: String,
        /// g or mL
        unit: String,
        kcal_per_100: f64,
        prot_per_100: f64,
        fiber_per_100: f64,
        /// Pipe-separated aliases, e.g. "pain|mie|toast"
        #[arg(default_value = "")]
        aliases: String,
    },

    /// Record a one-off kcal adjustment on a single day
    AddExtra {
        /// Date, YYYY-MM-DD
        date: String,
        kcal: f64,
        /// Free-text comment (words are joined with spaces)
        comment: Vec<String>,
    },

    /// Per-day totals over a window
    Summary {
        /// Window start, YYYY-MM-DD
        start: String,
        /// Number of days in the window
        days: i64,
        /// Emit the series as JSON
        #[arg(long)]
        json: bool,
    },

    /// Grouped day-by-day history from the cache, then refresh the chart
    History {
        /// Emit the groups as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start a new batch draft
    DraftNew {
        /// Window start, YYYY-MM-DD
        start: String,
        /// Number of days the draft will be spread over
        days: i64,
    },

    /// Add an item to the draft
    DraftAdd {
        /// Product id, name or alias (free text, must resolve uniquely)
        product: String,
        /// Quantity with unit, e.g. 700g or 250mL
        qty: String,
        /// Free-text comment
        comment: Vec<String>,
    },

    /// Show the draft items with totals and per-day shares
    DraftSummary,

    /// Commit the draft items as batches and rebuild the history cache
    DraftCommit,

    /// Delete the draft
    DraftClear,
}
