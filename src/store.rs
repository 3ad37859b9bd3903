//! Line store
//!
//! Minimal line-oriented CSV handling: one header line, comma-separated data
//! lines, no quoting or escaping. Files are single-writer; `rewrite` is a
//! plain truncate-and-write with no atomicity guarantee.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Split a CSV line on commas, trimming each field. No quoting support.
pub fn split_record(line: &str) -> Vec<String> {
    line.split(',').map(|f| f.trim().to_string()).collect()
}

/// Read all non-empty, trimmed lines of a file; a missing file yields none.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// A CSV file bound to a fixed header line
#[derive(Debug, Clone)]
pub struct CsvTable {
    path: PathBuf,
    header: &'static str,
}

impl CsvTable {
    pub fn new(path: impl Into<PathBuf>, header: &'static str) -> Self {
        Self {
            path: path.into(),
            header,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Create the file with just the header if it is missing or empty.
    pub fn ensure_exists(&self) -> Result<()> {
        if !self.is_missing_or_empty()? {
            return Ok(());
        }
        self.ensure_parent()?;
        fs::write(&self.path, format!("{}\n", self.header))?;
        Ok(())
    }

    /// All data records (header and blank lines skipped), fields trimmed.
    pub fn read_records(&self) -> Result<Vec<Vec<String>>> {
        let lines = read_lines(&self.path)?;
        Ok(lines.iter().skip(1).map(|l| split_record(l)).collect())
    }

    /// Append one record, writing the header first on a fresh file.
    pub fn append_record(&self, fields: &[String]) -> Result<()> {
        self.ensure_parent()?;
        let fresh = self.is_missing_or_empty()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        if fresh {
            writeln!(file, "{}", self.header)?;
        }
        writeln!(file, "{}", fields.join(","))?;
        Ok(())
    }

    /// Replace the whole file with the header plus the given records.
    pub fn rewrite<I>(&self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        self.ensure_parent()?;
        let mut out = format!("{}\n", self.header);
        for row in rows {
            out.push_str(&row.join(","));
            out.push('\n');
        }
        fs::write(&self.path, out)?;
        Ok(())
    }

    fn is_missing_or_empty(&self) -> Result<bool> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.len() == 0),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(true),
            Err(e) => Err(e.into()),
        }
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}
