//! Batch model
//!
//! A product quantity consumed in equal daily portions across a day range.

use serde::{Deserialize, Serialize};

use super::{check_day_span, CivilDate, Unit};
use crate::error::{Error, Result};

/// Header line of the batches CSV
pub const BATCHES_HEADER: &str = "batch_id,start_date,days,product_id,qty,unit,comment";

/// A product quantity spread uniformly over `[start, start + days - 1]`.
///
/// `qty` is the total over the whole span, not per day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub batch_id: String,
    pub start: CivilDate,
    pub days: i64,
    pub product_id: String,
    pub qty: f64,
    pub unit: Unit,
    pub comment: String,
}

impl Batch {
    /// Build from a CSV record: `batch_id,start_date,days,product_id,qty,unit[,comment]`
    pub fn from_record(fields: &[String]) -> Result<Self> {
        if fields.len() < 6 {
            return Err(Error::Format(format!(
                "batch record needs at least 6 fields, got {}",
                fields.len()
            )));
        }
        let start = CivilDate::parse(&fields[1])?;
        let days: i64 = fields[2]
            .parse()
            .map_err(|_| Error::Format(format!("bad day count {:?}", fields[2])))?;
        let days = check_day_span(days)?;
        let qty: f64 = fields[4]
            .parse()
            .map_err(|_| Error::Format(format!("bad quantity {:?}", fields[4])))?;

        Ok(Self {
            batch_id: fields[0].clone(),
            start,
            days,
            product_id: fields[3].clone(),
            qty,
            unit: Unit::from_str(&fields[5]),
            comment: fields.get(6).cloned().unwrap_or_default(),
        })
    }

    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.batch_id.clone(),
            self.start.to_string(),
            self.days.to_string(),
            self.product_id.clone(),
            self.qty.to_string(),
            self.unit.as_str().to_string(),
            self.comment.clone(),
        ]
    }

    /// Last day covered by this batch
    pub fn end(&self) -> CivilDate {
        self.start.add_days(self.days - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_record() {
        let b = Batch::from_record(&record(&[
            "2026-01-01_bread_01",
            "2026-01-01",
            "7",
            "bread",
            "700",
            "g",
            "weekly loaf",
        ]))
        .unwrap();
        assert_eq!(b.days, 7);
        assert_eq!(b.qty, 700.0);
        assert_eq!(b.end(), CivilDate::parse("2026-01-07").unwrap());
    }

    #[test]
    fn test_from_record_rejects_bad_rows() {
        // too short
        assert!(Batch::from_record(&record(&["b1", "2026-01-01", "7", "bread", "700"])).is_err());
        // bad date
        assert!(Batch::from_record(&record(&[
            "b1", "01/01/26", "7", "bread", "700", "g"
        ]))
        .is_err());
        // non-positive day count
        assert!(Batch::from_record(&record(&[
            "b1",
            "2026-01-01",
            "0",
            "bread",
            "700",
            "g"
        ]))
        .is_err());
        // absurd day count, would make the per-day loop run forever
        assert!(Batch::from_record(&record(&[
            "b1",
            "2026-01-01",
            "100000000",
            "bread",
            "700",
            "g"
        ]))
        .is_err());
    }
}
