//! Food tracker commands

use serde::Serialize;
use tracing::warn;

use crate::aggregate::{compute_daily_totals, load_batches, load_extras};
use crate::catalog::{ProductCatalog, PRODUCTS_HEADER};
use crate::cli::FoodCmd;
use crate::config::Paths;
use crate::error::{Error, Result};
use crate::history::{grouped_history, rebuild_history, round2, HISTORY_HEADER};
use crate::models::{
    check_day_span, parse_qty_unit, Batch, CivilDate, Draft, DraftItem, DraftMeta, Extra,
    Nutrition, Product, Unit, BATCHES_HEADER, EXTRAS_HEADER,
};
use crate::plot::render_chart;
use crate::store::CsvTable;

/// The food tracker's three permanent tables
struct Tables {
    products: CsvTable,
    batches: CsvTable,
    extras: CsvTable,
}

impl Tables {
    fn open(paths: &Paths) -> Result<Self> {
        let tables = Self {
            products: CsvTable::new(paths.products_csv(), PRODUCTS_HEADER),
            batches: CsvTable::new(paths.batches_csv(), BATCHES_HEADER),
            extras: CsvTable::new(paths.extras_csv(), EXTRAS_HEADER),
        };
        tables.products.ensure_exists()?;
        tables.batches.ensure_exists()?;
        tables.extras.ensure_exists()?;
        Ok(tables)
    }
}

/// One day of the summary output
#[derive(Debug, Serialize)]
struct DayRow {
    date: CivilDate,
    kcal: f64,
    protein: f64,
    fiber: f64,
}

pub fn run(paths: &Paths, cmd: FoodCmd) -> Result<()> {
    let tables = Tables::open(paths)?;
    let catalog = ProductCatalog::load(&tables.products)?;

    match cmd {
        FoodCmd::List => {
            let mut products: Vec<&Product> = catalog.products().iter().collect();
            products.sort_by(|a, b| a.id.cmp(&b.id));

            for p in products {
                let per = format!("/100{}", p.unit.as_str());
                println!(
                    "{:<14}{:<22}{:<8}{:<12}{:<8}{:<12}{:<8}{}",
                    p.id,
                    p.name,
                    p.kcal_per_100,
                    format!("kcal{per}"),
                    p.prot_per_100,
                    format!("g prot{per}"),
                    p.fiber_per_100,
                    format!("g fiber{per}"),
                );
            }
            Ok(())
        }

        FoodCmd::AddProduct {
            id,
            name,
            unit,
            kcal_per_100,
            prot_per_100,
            fiber_per_100,
            aliases,
        } => {
            let id = id.trim().to_string();
            if id.is_empty() || id.contains(',') || name.contains(',') || aliases.contains(',') {
                return Err(Error::Format(
                    "product fields must be non-empty and comma-free".to_string(),
                ));
            }
            if catalog.get_by_id(&id).is_some() {
                return Err(Error::Format(format!("product {id:?} already exists")));
            }

            let product = Product {
                id: id.clone(),
                name: name.trim().to_string(),
                unit: Unit::from_str(&unit),
                kcal_per_100,
                prot_per_100,
                fiber_per_100,
                aliases_raw: aliases.trim().to_string(),
            };
            ProductCatalog::add(&tables.products, &product)?;
            println!("Added product: {id}");
            Ok(())
        }

        FoodCmd::AddExtra {
            date,
            kcal,
            comment,
        } => {
            let extra = Extra {
                date: CivilDate::parse(&date)?,
                kcal,
                prot: 0.0,
                fiber: 0.0,
                comment: join_comment(&comment),
            };
            tables.extras.append_record(&extra.to_record())?;
            println!("Added extra: {} kcal on {}", extra.kcal, extra.date);

            refresh_cache(paths, &catalog, &tables);
            Ok(())
        }

        FoodCmd::Summary { start, days, json } => {
            let start = CivilDate::parse(&start)?;
            let days = check_day_span(days)?;

            let batches = load_batches(&tables.batches)?;
            let extras = load_extras(&tables.extras)?;
            let totals = compute_daily_totals(&catalog, &batches, &extras, start, days);

            let rows: Vec<DayRow> = totals
                .iter()
                .map(|(date, n)| DayRow {
                    date,
                    kcal: n.kcal,
                    protein: n.protein,
                    fiber: n.fiber,
                })
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for r in &rows {
                    println!(
                        "{} : {} kcal | {} g prot | {} g fiber",
                        r.date,
                        round2(r.kcal),
                        round2(r.protein),
                        round2(r.fiber)
                    );
                }
                let total: Nutrition = totals.iter().map(|(_, n)| n).sum();
                let (total_line, mean_line) = summary_footer(total, days);
                println!("{total_line}");
                println!("{mean_line}");
            }
            Ok(())
        }

        FoodCmd::History { json } => {
            let cache = CsvTable::new(paths.history_csv(), HISTORY_HEADER);
            if !cache.exists() {
                return Err(Error::NotFound(format!(
                    "history cache {} (run add-extra or draft-commit first)",
                    cache.path().display()
                )));
            }

            let groups = grouped_history(&cache)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&groups)?);
            } else if groups.is_empty() {
                println!("History is empty.");
            } else {
                for g in &groups {
                    println!("{g}");
                }
            }

            // This command's contract is "report and plot": a failed chart
            // render is an error, after the groups were printed.
            let status = render_chart(
                &paths.food_plot_script(),
                &paths.history_csv(),
                &paths.food_plot_png(),
            )?;
            if !status.success() {
                return Err(Error::Io(std::io::Error::other(format!(
                    "plot script failed: {status}"
                ))));
            }
            // stdout carries the JSON document alone in --json mode
            if json {
                eprintln!("plot updated: {}", paths.food_plot_png().display());
            } else {
                println!("plot updated: {}", paths.food_plot_png().display());
            }
            Ok(())
        }

        FoodCmd::DraftNew { start, days } => {
            let start = CivilDate::parse(&start)?;
            let days = check_day_span(days)?;

            Draft::init(&paths.draft_csv(), DraftMeta { start, days })?;
            println!("Draft created ({start}, {days} days)");
            Ok(())
        }

        FoodCmd::DraftAdd {
            product,
            qty,
            comment,
        } => {
            let draft_path = paths.draft_csv();
            if !Draft::exists(&draft_path) {
                return Err(Error::NotFound(
                    "no draft (run draft-new <start> <days> first)".to_string(),
                ));
            }

            let (qty, unit) = parse_qty_unit(&qty)?;
            let resolved = catalog
                .resolve(&product)
                .ok_or_else(|| Error::NotFound(format!("product {product:?}")))?;

            let item = DraftItem {
                product_id: resolved.id.clone(),
                qty,
                unit,
                comment: join_comment(&comment),
            };
            Draft::append_item(&draft_path, &item)?;
            println!("Added to draft: {} {}{}", item.product_id, qty, unit.as_str());
            Ok(())
        }

        FoodCmd::DraftSummary => {
            let draft = load_draft(paths)?;
            if draft.items.is_empty() {
                println!("Draft is empty (no items).");
                return Ok(());
            }

            let days = draft.meta.days as f64;
            let mut total = Nutrition::zero();

            println!("Draft: {} over {} days", draft.meta.start, draft.meta.days);
            for item in &draft.items {
                let Some(p) = catalog.get_by_id(&item.product_id) else {
                    println!("  unknown product: {} (ignored)", item.product_id);
                    continue;
                };
                let n = p.nutrition_for(item.qty);
                total += n;

                println!(
                    "  {} ({}): {} kcal total -> {} kcal/day ; {} g prot total -> {} g prot/day ; {} g fiber total -> {} g fiber/day",
                    p.id,
                    p.name,
                    round2(n.kcal),
                    round2(n.kcal / days),
                    round2(n.protein),
                    round2(n.protein / days),
                    round2(n.fiber),
                    round2(n.fiber / days),
                );
            }

            println!(
                "Total: {} kcal ; {} g prot ; {} g fiber",
                round2(total.kcal),
                round2(total.protein),
                round2(total.fiber)
            );
            println!(
                "Daily mean: {} kcal/day ; {} g prot/day ; {} g fiber/day",
                round2(total.kcal / days),
                round2(total.protein / days),
                round2(total.fiber / days)
            );
            Ok(())
        }

        FoodCmd::DraftCommit => {
            let draft = load_draft(paths)?;
            if draft.items.is_empty() {
                return Err(Error::NotFound("draft has no items".to_string()));
            }

            for (k, item) in draft.items.iter().enumerate() {
                let batch = Batch {
                    batch_id: format!("{}_{}_{:02}", draft.meta.start, item.product_id, k + 1),
                    start: draft.meta.start,
                    days: draft.meta.days,
                    product_id: item.product_id.clone(),
                    qty: item.qty,
                    unit: item.unit,
                    comment: item.comment.clone(),
                };
                tables.batches.append_record(&batch.to_record())?;
            }

            refresh_cache(paths, &catalog, &tables);
            Draft::clear(&paths.draft_csv())?;
            println!("Draft committed ({} items)", draft.items.len());
            Ok(())
        }

        FoodCmd::DraftClear => {
            Draft::clear(&paths.draft_csv())?;
            println!("Draft cleared");
            Ok(())
        }
    }
}

fn load_draft(paths: &Paths) -> Result<Draft> {
    let path = paths.draft_csv();
    if !Draft::exists(&path) {
        return Err(Error::NotFound(
            "no draft (run draft-new <start> <days> first)".to_string(),
        ));
    }
    Draft::load(&path)
}

/// Window total and per-day mean lines printed after the summary rows.
fn summary_footer(total: Nutrition, days: i64) -> (String, String) {
    let d = days as f64;
    (
        format!(
            "Total: {} kcal ; {} g prot ; {} g fiber",
            round2(total.kcal),
            round2(total.protein),
            round2(total.fiber)
        ),
        format!(
            "Daily mean: {} kcal/day ; {} g prot/day ; {} g fiber/day",
            round2(total.kcal / d),
            round2(total.protein / d),
            round2(total.fiber / d)
        ),
    )
}

/// Comments are joined with spaces before storage; the line store has no
/// quoting, so a literal comma never reaches the file.
fn join_comment(words: &[String]) -> String {
    words.join(" ").replace(',', " ")
}

/// Rebuild the per-day cache after a write; failures are reported, not fatal.
fn refresh_cache(paths: &Paths, catalog: &ProductCatalog, tables: &Tables) {
    let cache = CsvTable::new(paths.history_csv(), HISTORY_HEADER);
    let result = load_batches(&tables.batches).and_then(|batches| {
        let extras = load_extras(&tables.extras)?;
        rebuild_history(catalog, &batches, &extras, &cache)
    });

    match result {
        Ok(0) => warn!("no data in batches/extras, history cache not rebuilt"),
        Ok(_) => {}
        Err(err) => warn!("history cache rebuild failed: {err}"),
    }
}
