//! Path configuration
//!
//! All file locations flow from this struct, populated once at the program
//! boundary (environment, then CLI override). Core logic never reads the
//! environment itself.

use std::env;
use std::path::{Path, PathBuf};

/// Where the data files and analytics scripts live
#[derive(Debug, Clone)]
pub struct Paths {
    pub data_dir: PathBuf,
    pub analytics_dir: PathBuf,
}

impl Paths {
    /// Honor `DAILYTRACK_ROOT_DIR` / `DAILYTRACK_DATA_DIR`, defaulting to
    /// `./data` and `./analytics` under the current directory.
    pub fn from_env() -> Self {
        let root = env::var_os("DAILYTRACK_ROOT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let data_dir = env::var_os("DAILYTRACK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| root.join("data"));

        Self {
            data_dir,
            analytics_dir: root.join("analytics"),
        }
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    fn data(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    fn script(&self, name: &str) -> PathBuf {
        self.analytics_dir.join(name)
    }

    pub fn products_csv(&self) -> PathBuf {
        self.data("food_products.csv")
    }

    pub fn batches_csv(&self) -> PathBuf {
        self.data("food_batches.csv")
    }

    pub fn extras_csv(&self) -> PathBuf {
        self.data("food_extras.csv")
    }

    pub fn history_csv(&self) -> PathBuf {
        self.data("food_history.csv")
    }

    pub fn draft_csv(&self) -> PathBuf {
        self.data("draft.csv")
    }

    pub fn weights_csv(&self) -> PathBuf {
        self.data("weight_history.csv")
    }

    pub fn food_plot_script(&self) -> PathBuf {
        self.script("food_history.py")
    }

    pub fn weight_plot_script(&self) -> PathBuf {
        self.script("weight_history.py")
    }

    pub fn food_plot_png(&self) -> PathBuf {
        self.data("food_history.png")
    }

    pub fn weight_plot_png(&self) -> PathBuf {
        self.data("weight_history.png")
    }
}

impl Paths {
    /// Fixed paths for tests and callers that already know their directories.
    pub fn rooted(root: &Path) -> Self {
        Self {
            data_dir: root.join("data"),
            analytics_dir: root.join("analytics"),
        }
    }
}
