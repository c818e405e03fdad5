//! Logging and progress reporting for record loading

pub mod log;
pub mod progress;

pub use self::log::LoadLog;
pub use progress::{create_main_progress_bar, create_spinner, finish_progress_bar};
