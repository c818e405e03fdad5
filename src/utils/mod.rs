//! Shared utilities for logging and progress reporting

pub mod logging;

pub use logging::{LoadLog, create_main_progress_bar, create_spinner, finish_progress_bar};
