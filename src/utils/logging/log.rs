//! Load logging
//!
//! Every record source reports the same pair of lines: what it started
//! reading, and how much it produced in how long.

use std::path::Path;
use std::time::{Duration, Instant};

use log::{info, warn};

/// Timed log scope for reading one record source
#[derive(Debug)]
pub struct LoadLog<'a> {
    operation: &'static str,
    path: &'a Path,
    started: Instant,
}

impl<'a> LoadLog<'a> {
    /// Log the start of `operation` on `path` and start the clock
    #[must_use]
    pub fn start(operation: &'static str, path: &'a Path) -> Self {
        info!("{operation}: {}", path.display());
        Self {
            operation,
            path,
            started: Instant::now(),
        }
    }

    /// Time since the scope started
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Log the number of records produced and the elapsed time
    pub fn records(self, count: usize) {
        info!(
            "{}: {count} records from {} in {:?}",
            self.operation,
            self.path.display(),
            self.elapsed()
        );
    }

    /// Log the number of record files found
    ///
    /// Warns instead when the directory holds none.
    pub fn files(self, count: usize) {
        if count == 0 {
            warn!("No JSON or Parquet files found in {}", self.path.display());
        } else {
            info!("{}: {count} record files in {}", self.operation, self.path.display());
        }
    }
}
