//! Batch draft model
//!
//! A pending multi-item batch: a start date and day count, plus the items
//! collected so far. Stored in its own small CSV with two sections:
//!
//! ```text
//! start_date,days
//! 2026-01-17,7
//! product_id,qty,unit,comment
//! bread,700,g,weekly loaf
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{check_day_span, CivilDate, Unit};
use crate::error::{Error, Result};
use crate::store::{read_lines, split_record};

/// Window a draft will be committed over
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DraftMeta {
    pub start: CivilDate,
    pub days: i64,
}

/// One product line of a draft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftItem {
    pub product_id: String,
    pub qty: f64,
    pub unit: Unit,
    pub comment: String,
}

/// A loaded draft
#[derive(Debug, Clone)]
pub struct Draft {
    pub meta: DraftMeta,
    pub items: Vec<DraftItem>,
}

impl Draft {
    /// Reset the draft file to an empty draft over the given window.
    pub fn init(path: &Path, meta: DraftMeta) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(
            path,
            format!(
                "start_date,days\n{},{}\nproduct_id,qty,unit,comment\n",
                meta.start, meta.days
            ),
        )?;
        Ok(())
    }

    pub fn exists(path: &Path) -> bool {
        path.exists()
    }

    /// Delete the draft file if present.
    pub fn clear(path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Append one item line to an existing draft.
    pub fn append_item(path: &Path, item: &DraftItem) -> Result<()> {
        let mut text = fs::read_to_string(path)?;
        if !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&format!(
            "{},{},{},{}\n",
            item.product_id,
            item.qty,
            item.unit.as_str(),
            item.comment
        ));
        fs::write(path, text)?;
        Ok(())
    }

    /// Load the draft; fails when the meta section is malformed.
    ///
    /// Item lines with fewer than 3 fields are skipped like any other
    /// malformed record.
    pub fn load(path: &Path) -> Result<Self> {
        let lines = read_lines(path)?;
        if lines.len() < 2 {
            return Err(Error::Format("draft file has no metadata".to_string()));
        }

        // line 0: meta header, line 1: meta row, line 2: item header
        let meta_fields = split_record(&lines[1]);
        if meta_fields.len() < 2 {
            return Err(Error::Format("draft metadata row is malformed".to_string()));
        }
        let start = CivilDate::parse(&meta_fields[0])?;
        let days: i64 = meta_fields[1]
            .parse()
            .map_err(|_| Error::Format(format!("bad draft day count {:?}", meta_fields[1])))?;
        let days = check_day_span(days)?;

        let mut items = Vec::new();
        for line in lines.iter().skip(3) {
            let fields = split_record(line);
            if fields.len() < 3 {
                continue;
            }
            let qty: f64 = match fields[1].parse() {
                Ok(q) => q,
                Err(_) => continue,
            };
            items.push(DraftItem {
                product_id: fields[0].clone(),
                qty,
                unit: Unit::from_str(&fields[2]),
                comment: fields.get(3).cloned().unwrap_or_default(),
            });
        }

        Ok(Self {
            meta: DraftMeta { start, days },
            items,
        })
    }
}
