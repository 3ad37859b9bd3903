//! Extra model
//!
//! A one-off, product-independent nutrition adjustment on a single day.

use serde::{Deserialize, Serialize};

use super::{CivilDate, Nutrition};
use crate::error::{Error, Result};

/// Header line of the extras CSV
pub const EXTRAS_HEADER: &str = "date,kcal,prot,fiber,comment";

/// A single-day nutrition delta
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extra {
    pub date: CivilDate,
    pub kcal: f64,
    pub prot: f64,
    pub fiber: f64,
    pub comment: String,
}

impl Extra {
    /// Build from a CSV record: `date,kcal,prot,fiber[,comment]`
    pub fn from_record(fields: &[String]) -> Result<Self> {
        if fields.len() < 4 {
            return Err(Error::Format(format!(
                "extra record needs at least 4 fields, got {}",
                fields.len()
            )));
        }
        Ok(Self {
            date: CivilDate::parse(&fields[0])?,
            kcal: parse_f64(&fields[1])?,
            prot: parse_f64(&fields[2])?,
            fiber: parse_f64(&fields[3])?,
            comment: fields.get(4).cloned().unwrap_or_default(),
        })
    }

    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.date.to_string(),
            self.kcal.to_string(),
            self.prot.to_string(),
            self.fiber.to_string(),
            self.comment.clone(),
        ]
    }

    /// The whole entry as a nutrition delta (already per-day, no division)
    pub fn nutrition(&self) -> Nutrition {
        Nutrition::new(self.kcal, self.prot, self.fiber)
    }
}

fn parse_f64(s: &str) -> Result<f64> {
    s.trim()
        .parse()
        .map_err(|_| Error::Format(format!("bad number {s:?}")))
}
