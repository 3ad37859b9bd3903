//! History compression
//!
//! Walks per-day series in date order: finds the usable date range across
//! all stored data, collapses consecutive value-equal days into groups for
//! display, and rebuilds the per-day cache CSV.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::aggregate::compute_daily_totals;
use crate::catalog::ProductCatalog;
use crate::error::Result;
use crate::models::{Batch, CivilDate, Extra, Nutrition};
use crate::store::CsvTable;

/// Header line of the rebuilt history cache CSV
pub const HISTORY_HEADER: &str = "date,kcal,protein,fiber";

/// Round to 2 decimal places
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn same_val(a: f64, b: f64) -> bool {
    (round2(a) - round2(b)).abs() < 1e-9
}

fn same_totals(a: Nutrition, b: Nutrition) -> bool {
    same_val(a.kcal, b.kcal) && same_val(a.protein, b.protein) && same_val(a.fiber, b.fiber)
}

fn is_zero(n: Nutrition) -> bool {
    same_totals(n, Nutrition::zero())
}

/// A maximal run of consecutive days sharing rounded-equal totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub start: CivilDate,
    pub end: CivilDate,
    pub totals: Nutrition,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{} : ", self.start)?;
        } else {
            write!(f, "{} -> {} : ", self.start, self.end)?;
        }
        write!(
            f,
            "{} kcal | {} g prot | {} g fiber",
            round2(self.totals.kcal),
            round2(self.totals.protein),
            round2(self.totals.fiber)
        )
    }
}

/// Overall `[min, max]` date range spanned by all batches and extras.
///
/// Batches cover `[start, start + days - 1]`; extras cover their single day.
/// Returns `None` when no record exists.
pub fn available_range(batches: &[Batch], extras: &[Extra]) -> Option<(CivilDate, CivilDate)> {
    let mut range: Option<(CivilDate, CivilDate)> = None;

    let mut cover = |start: CivilDate, end: CivilDate| {
        range = Some(match range {
            None => (start, end),
            Some((min, max)) => (min.min(start), max.max(end)),
        });
    };

    for batch in batches {
        cover(batch.start, batch.end());
    }
    for extra in extras {
        cover(extra.date, extra.date);
    }

    range
}

/// Collapse an ascending per-day series into maximal groups.
///
/// A day extends the current group only when it is exactly one calendar day
/// after the previous day and all three rounded values match; a continuity
/// break always starts a new group even when values are equal. Groups whose
/// rounded values are all zero are dropped (no data, not zero intake).
pub fn group_days(series: &[(CivilDate, Nutrition)]) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    let mut current: Option<Group> = None;

    for &(date, totals) in series {
        match current.as_mut() {
            Some(group) if date == group.end.succ() && same_totals(totals, group.totals) => {
                group.end = date;
            }
            _ => {
                if let Some(done) = current.take() {
                    if !is_zero(done.totals) {
                        groups.push(done);
                    }
                }
                current = Some(Group {
                    start: date,
                    end: date,
                    totals,
                });
            }
        }
    }

    if let Some(done) = current {
        if !is_zero(done.totals) {
            groups.push(done);
        }
    }

    groups
}

/// Rebuild the per-day cache CSV over the full available range.
///
/// Writes one `date,kcal,protein,fiber` row per day ascending, zeros
/// included. Returns the number of days written; with no stored data the
/// cache is left untouched and `Ok(0)` is returned.
pub fn rebuild_history(
    catalog: &ProductCatalog,
    batches: &[Batch],
    extras: &[Extra],
    table: &CsvTable,
) -> Result<usize> {
    let Some((min, max)) = available_range(batches, extras) else {
        return Ok(0);
    };
    let days = CivilDate::days_between_inclusive(min, max)?;

    let totals = compute_daily_totals(catalog, batches, extras, min, days);
    table.rewrite(totals.iter().map(|(date, n)| {
        vec![
            date.to_string(),
            n.kcal.to_string(),
            n.protein.to_string(),
            n.fiber.to_string(),
        ]
    }))?;

    Ok(totals.len())
}

/// Read the cache CSV back as an ordered per-day series; bad rows skipped.
pub fn load_history(table: &CsvTable) -> Result<Vec<(CivilDate, Nutrition)>> {
    let mut series = Vec::new();
    for fields in table.read_records()? {
        if fields.len() < 4 {
            warn!("skipping short history row");
            continue;
        }
        let date = match CivilDate::parse(&fields[0]) {
            Ok(d) => d,
            Err(err) => {
                warn!("skipping history row: {err}");
                continue;
            }
        };
        let nums: Vec<f64> = fields[1..4]
            .iter()
            .filter_map(|f| f.parse().ok())
            .collect();
        if nums.len() < 3 {
            warn!("skipping history row for {date}: bad numbers");
            continue;
        }
        series.push((date, Nutrition::new(nums[0], nums[1], nums[2])));
    }
    Ok(series)
}

/// Convenience: cached series already grouped
pub fn grouped_history(table: &CsvTable) -> Result<Vec<Group>> {
    Ok(group_days(&load_history(table)?))
}
