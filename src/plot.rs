//! External chart renderer
//!
//! The analytics scripts are separate Python programs consuming a CSV and
//! producing an image; the only contract is the exit code. Callers report
//! failures without discarding already-printed results.

use std::path::Path;
use std::process::{Command, ExitStatus};

use crate::error::{Error, Result};

/// Run `python3 <script> --csv <csv> --out <out>` and wait for it.
pub fn render_chart(script: &Path, csv: &Path, out: &Path) -> Result<ExitStatus> {
    if !script.exists() {
        return Err(Error::NotFound(format!(
            "plot script {}",
            script.display()
        )));
    }

    let status = Command::new("python3")
        .arg(script)
        .arg("--csv")
        .arg(csv)
        .arg("--out")
        .arg(out)
        .status()?;
    Ok(status)
}
