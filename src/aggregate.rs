//! Daily aggregation
//!
//! Reconciles batches (spread uniformly over their day range) and extras
//! (single-day deltas) into a dense per-day nutrition ledger over a
//! requested window.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::catalog::ProductCatalog;
use crate::error::Result;
use crate::models::{Batch, CivilDate, Extra, Nutrition};
use crate::store::CsvTable;

/// Dense per-day totals over a closed date window, ascending by date
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyTotals(BTreeMap<CivilDate, Nutrition>);

impl DailyTotals {
    /// Every day of `[start, start + days - 1]` initialized to zero
    fn zeroed(start: CivilDate, days: i64) -> Self {
        let mut map = BTreeMap::new();
        for k in 0..days.max(0) {
            map.insert(start.add_days(k), Nutrition::zero());
        }
        Self(map)
    }

    /// Add a contribution to an in-window day; out-of-window dates are ignored.
    fn add(&mut self, date: CivilDate, delta: Nutrition) {
        if let Some(slot) = self.0.get_mut(&date) {
            *slot += delta;
        }
    }

    pub fn get(&self, date: CivilDate) -> Option<&Nutrition> {
        self.0.get(&date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Days in ascending date order
    pub fn iter(&self) -> impl Iterator<Item = (CivilDate, Nutrition)> + '_ {
        self.0.iter().map(|(d, n)| (*d, *n))
    }
}

/// Compute per-day kcal/protein/fiber totals for `[start, start + days - 1]`.
///
/// Each batch contributes `qty * per_100 / 100 / day_count` per nutrient to
/// every one of its days that falls inside the window; batches referencing an
/// unknown product are skipped. Extras are added verbatim on their date.
/// Contributions are strictly additive, so the result is independent of
/// input order.
pub fn compute_daily_totals(
    catalog: &ProductCatalog,
    batches: &[Batch],
    extras: &[Extra],
    start: CivilDate,
    days: i64,
) -> DailyTotals {
    let mut totals = DailyTotals::zeroed(start, days);
    if totals.is_empty() {
        return totals;
    }

    for batch in batches {
        let Some(product) = catalog.get_by_id(&batch.product_id) else {
            warn!("unknown product {:?} in batch {}", batch.product_id, batch.batch_id);
            continue;
        };
        if batch.days <= 0 {
            continue;
        }
        let per_day = product
            .nutrition_for(batch.qty)
            .scale(1.0 / batch.days as f64);
        for k in 0..batch.days {
            totals.add(batch.start.add_days(k), per_day);
        }
    }

    for extra in extras {
        totals.add(extra.date, extra.nutrition());
    }

    totals
}

/// Load all parseable batches; malformed rows are counted and skipped.
pub fn load_batches(table: &CsvTable) -> Result<Vec<Batch>> {
    let mut batches = Vec::new();
    let mut skipped = 0usize;
    for fields in table.read_records()? {
        match Batch::from_record(&fields) {
            Ok(batch) => batches.push(batch),
            Err(err) => {
                warn!("skipping batch row: {err}");
                skipped += 1;
            }
        }
    }
    if skipped > 0 {
        debug!("{skipped} malformed batch row(s) ignored");
    }
    Ok(batches)
}

/// Load all parseable extras; malformed rows are counted and skipped.
pub fn load_extras(table: &CsvTable) -> Result<Vec<Extra>> {
    let mut extras = Vec::new();
    let mut skipped = 0usize;
    for fields in table.read_records()? {
        match Extra::from_record(&fields) {
            Ok(extra) => extras.push(extra),
            Err(err) => {
                warn!("skipping extra row: {err}");
                skipped += 1;
            }
        }
    }
    if skipped > 0 {
        debug!("{skipped} malformed extra row(s) ignored");
    }
    Ok(extras)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CivilDate {
        CivilDate::parse(s).unwrap()
    }

    fn record(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    fn bread_catalog() -> ProductCatalog {
        let dir = tempfile::TempDir::new().unwrap();
        let table = CsvTable::new(dir.path().join("products.csv"), crate::catalog::PRODUCTS_HEADER);
        table
            .append_record(&record(&["bread", "Pain de mie", "g", "265", "9", "3", "pain"]))
            .unwrap();
        ProductCatalog::load(&table).unwrap()
    }

    fn batch(start: &str, days: i64, product: &str, qty: f64) -> Batch {
        Batch::from_record(&record(&[
            "b1",
            start,
            &days.to_string(),
            product,
            &qty.to_string(),
            "g",
        ]))
        .unwrap()
    }

    fn extra(date_s: &str, kcal: f64) -> Extra {
        Extra::from_record(&record(&[date_s, &kcal.to_string(), "0", "0"])).unwrap()
    }

    #[test]
    fn test_bread_week_with_extra() {
        // 700 g of bread (265 kcal / 9 g prot per 100 g) over 7 days
        // plus 50 kcal extra on day 3.
        let catalog = bread_catalog();
        let batches = vec![batch("2026-01-01", 7, "bread", 700.0)];
        let extras = vec![extra("2026-01-03", 50.0)];

        let totals = compute_daily_totals(&catalog, &batches, &extras, date("2026-01-01"), 7);
        assert_eq!(totals.len(), 7);

        let day3 = totals.get(date("2026-01-03")).unwrap();
        assert!((day3.kcal - 315.0).abs() < 1e-9);

        for (d, n) in totals.iter() {
            if d != date("2026-01-03") {
                assert!((n.kcal - 265.0).abs() < 1e-9, "day {d}");
            }
            assert!((n.protein - 9.0).abs() < 1e-9);
            assert!((n.fiber - 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_order_independence() {
        let catalog = bread_catalog();
        let mut batches = vec![
            batch("2026-01-01", 7, "bread", 700.0),
            batch("2026-01-03", 2, "bread", 100.0),
        ];
        let mut extras = vec![extra("2026-01-02", 30.0), extra("2026-01-02", 20.0)];

        let a = compute_daily_totals(&catalog, &batches, &extras, date("2026-01-01"), 7);
        batches.reverse();
        extras.reverse();
        let b = compute_daily_totals(&catalog, &batches, &extras, date("2026-01-01"), 7);
        assert_eq!(a, b);
    }

    #[test]
    fn test_batch_outside_window_contributes_nothing() {
        let catalog = bread_catalog();
        let batches = vec![batch("2026-02-01", 7, "bread", 700.0)];

        let totals = compute_daily_totals(&catalog, &batches, &[], date("2026-01-01"), 7);
        for (_, n) in totals.iter() {
            assert_eq!(n, Nutrition::zero());
        }
    }

    #[test]
    fn test_batch_partial_overlap_clips_to_window() {
        let catalog = bread_catalog();
        // 4 days starting 2025-12-30: only Jan 1 and Jan 2 are in window.
        let batches = vec![batch("2025-12-30", 4, "bread", 400.0)];

        let totals = compute_daily_totals(&catalog, &batches, &[], date("2026-01-01"), 7);
        let per_day = 400.0 * 265.0 / 100.0 / 4.0;
        assert!((totals.get(date("2026-01-01")).unwrap().kcal - per_day).abs() < 1e-9);
        assert!((totals.get(date("2026-01-02")).unwrap().kcal - per_day).abs() < 1e-9);
        assert_eq!(*totals.get(date("2026-01-03")).unwrap(), Nutrition::zero());
    }

    #[test]
    fn test_unknown_product_is_skipped() {
        let catalog = bread_catalog();
        let batches = vec![
            batch("2026-01-01", 1, "butter", 100.0),
            batch("2026-01-01", 1, "bread", 100.0),
        ];

        let totals = compute_daily_totals(&catalog, &batches, &[], date("2026-01-01"), 1);
        assert!((totals.get(date("2026-01-01")).unwrap().kcal - 265.0).abs() < 1e-9);
    }

    #[test]
    fn test_extra_outside_window_is_ignored() {
        let catalog = bread_catalog();
        let extras = vec![extra("2026-01-09", 500.0)];
        let totals = compute_daily_totals(&catalog, &[], &extras, date("2026-01-01"), 7);
        for (_, n) in totals.iter() {
            assert_eq!(n, Nutrition::zero());
        }
    }

    #[test]
    fn test_load_batches_skips_malformed_rows() {
        let dir = tempfile::TempDir::new().unwrap();
        let table = CsvTable::new(dir.path().join("batches.csv"), crate::models::BATCHES_HEADER);
        table
            .append_record(&record(&["b1", "2026-01-01", "7", "bread", "700", "g", "ok"]))
            .unwrap();
        table
            .append_record(&record(&["b2", "bad-date!!", "7", "bread", "700", "g"]))
            .unwrap();
        table
            .append_record(&record(&["b3", "2026-01-01", "0", "bread", "700", "g"]))
            .unwrap();

        let batches = load_batches(&table).unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].batch_id, "b1");
    }

    #[test]
    fn test_load_extras_skips_malformed_rows() {
        let dir = tempfile::TempDir::new().unwrap();
        let table = CsvTable::new(dir.path().join("extras.csv"), crate::models::EXTRAS_HEADER);
        table
            .append_record(&record(&["2026-01-03", "50", "0", "0", "ok"]))
            .unwrap();
        table
            .append_record(&record(&["2026-01-03", "abc", "0", "0"]))
            .unwrap();

        let extras = load_extras(&table).unwrap();
        assert_eq!(extras.len(), 1);
    }
}
