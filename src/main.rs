//! dailytrack
//!
//! Personal weight and food tracking CLI over flat CSV files.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dailytrack::cli::{Cli, Tracker};
use dailytrack::commands;
use dailytrack::config::Paths;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("dailytrack=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut paths = Paths::from_env();
    if let Some(dir) = cli.data_dir {
        paths = paths.with_data_dir(dir);
    }

    let result = match cli.tracker {
        Tracker::Weight(cmd) => commands::weight::run(&paths, cmd),
        Tracker::Food(cmd) => commands::food::run(&paths, cmd),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
