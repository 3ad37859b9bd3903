//! Weight history storage
//!
//! One row per date, kept sorted ascending. Upsert and remove rewrite the
//! whole file; a concurrent writer could lose updates (accepted limitation,
//! the data files are single-writer).

use std::path::PathBuf;

use tracing::warn;

use crate::error::Result;
use crate::models::{CivilDate, WeightEntry, WEIGHTS_HEADER};
use crate::store::CsvTable;

/// The `date,weight_kg` history file
#[derive(Debug, Clone)]
pub struct WeightLog {
    table: CsvTable,
}

impl WeightLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            table: CsvTable::new(path, WEIGHTS_HEADER),
        }
    }

    /// All entries sorted ascending by date; malformed rows are skipped.
    pub fn load_all(&self) -> Result<Vec<WeightEntry>> {
        let mut rows = Vec::new();
        for fields in self.table.read_records()? {
            match WeightEntry::from_record(&fields) {
                Ok(entry) => rows.push(entry),
                Err(err) => warn!("skipping weight row: {err}"),
            }
        }
        rows.sort_by_key(|e| e.date);
        Ok(rows)
    }

    /// Replace the entry for `entry.date` or insert it; the file stays
    /// sorted. Returns `true` when an existing row was replaced.
    pub fn upsert(&self, entry: WeightEntry) -> Result<bool> {
        let mut rows = self.load_all()?;

        let replaced = match rows.iter_mut().find(|r| r.date == entry.date) {
            Some(row) => {
                row.kg = entry.kg;
                true
            }
            None => {
                rows.push(entry);
                false
            }
        };

        rows.sort_by_key(|e| e.date);
        self.rewrite(&rows)?;
        Ok(replaced)
    }

    /// Drop the entry for a date; returns `false` when none existed.
    pub fn remove(&self, date: CivilDate) -> Result<bool> {
        let mut rows = self.load_all()?;
        let before = rows.len();
        rows.retain(|e| e.date != date);
        if rows.len() == before {
            return Ok(false);
        }
        self.rewrite(&rows)?;
        Ok(true)
    }

    fn rewrite(&self, rows: &[WeightEntry]) -> Result<()> {
        self.table.rewrite(rows.iter().map(WeightEntry::to_record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date(s: &str) -> CivilDate {
        CivilDate::parse(s).unwrap()
    }

    fn entry(s: &str, kg: f64) -> WeightEntry {
        WeightEntry { date: date(s), kg }
    }

    fn log(dir: &TempDir) -> WeightLog {
        WeightLog::new(dir.path().join("weight_history.csv"))
    }

    #[test]
    fn test_upsert_inserts_sorted() {
        let dir = TempDir::new().unwrap();
        let log = log(&dir);

        assert!(!log.upsert(entry("2026-01-10", 62.0)).unwrap());
        assert!(!log.upsert(entry("2026-01-05", 63.0)).unwrap());
        assert!(!log.upsert(entry("2026-01-07", 62.5)).unwrap());

        // the file itself is sorted, not just the loaded view
        let text = std::fs::read_to_string(dir.path().join("weight_history.csv")).unwrap();
        assert_eq!(
            text,
            "date,weight_kg\n2026-01-05,63\n2026-01-07,62.5\n2026-01-10,62\n"
        );
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let dir = TempDir::new().unwrap();
        let log = log(&dir);

        log.upsert(entry("2026-01-05", 63.0)).unwrap();
        log.upsert(entry("2026-01-10", 62.0)).unwrap();
        assert!(log.upsert(entry("2026-01-05", 61.5)).unwrap());

        let rows = log.load_all().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].kg, 61.5);
        assert_eq!(rows[0].date, date("2026-01-05"));
    }

    #[test]
    fn test_remove() {
        let dir = TempDir::new().unwrap();
        let log = log(&dir);

        log.upsert(entry("2026-01-05", 63.0)).unwrap();
        assert!(log.remove(date("2026-01-05")).unwrap());
        assert!(!log.remove(date("2026-01-05")).unwrap());
        assert!(log.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_load_skips_malformed_rows() {
        let dir = TempDir::new().unwrap();
        let log = log(&dir);
        std::fs::write(
            dir.path().join("weight_history.csv"),
            "date,weight_kg\n2026-01-05,63.0\nnot-a-date,70\n2026-01-06,heavy\n",
        )
        .unwrap();

        let rows = log.load_all().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kg, 63.0);
    }
}
