//! Weight tracker commands

use tracing::warn;

use crate::cli::WeightCmd;
use crate::config::Paths;
use crate::error::{Error, Result};
use crate::models::{kg_to_lb, parse_weight_kg, CivilDate, WeightEntry};
use crate::plot::render_chart;
use crate::weight_log::WeightLog;

pub fn run(paths: &Paths, cmd: WeightCmd) -> Result<()> {
    let log = WeightLog::new(paths.weights_csv());

    match cmd {
        WeightCmd::Add { date, weight } => {
            let date = CivilDate::parse(&date)?;
            let kg = parse_weight_kg(&weight)?;

            let replaced = log.upsert(WeightEntry { date, kg })?;
            println!(
                "{}: {date} -> {kg} kg",
                if replaced { "Updated" } else { "Added" }
            );
            Ok(())
        }

        WeightCmd::Remove { date } => {
            let date = CivilDate::parse(&date)?;
            if !log.remove(date)? {
                return Err(Error::NotFound(format!("no weight entry for {date}")));
            }
            println!("Removed: {date}");
            Ok(())
        }

        WeightCmd::History => {
            print_history(&log.load_all()?);

            // Chart refresh is best-effort for this command.
            match render_chart(
                &paths.weight_plot_script(),
                &paths.weights_csv(),
                &paths.weight_plot_png(),
            ) {
                Ok(status) if status.success() => {
                    println!("plot updated: {}", paths.weight_plot_png().display());
                }
                Ok(status) => warn!("plot script failed: {status}"),
                Err(err) => warn!("plot skipped: {err}"),
            }
            Ok(())
        }
    }
}

fn print_history(rows: &[WeightEntry]) {
    if rows.is_empty() {
        println!("Weight history is empty.");
        return;
    }

    println!("Weight history:");
    for e in rows {
        println!("  {}  ->  {} kg ({:.2} lb)", e.date, e.kg, kg_to_lb(e.kg));
    }

    if let [.., prev, last] = rows {
        println!(
            "\nLast change: {:+.2} kg ({:+.2} lb) ({} -> {})",
            last.kg - prev.kg,
            kg_to_lb(last.kg) - kg_to_lb(prev.kg),
            prev.date,
            last.date
        );
    }
}
