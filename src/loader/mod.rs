//! Snapshot loading
//!
//! Reads patient and insight records from JSON or Parquet files, or from a
//! directory of such files, and builds an immutable [`RecordSnapshot`].
//! Directory sources are loaded in parallel (rayon for the blocking path,
//! tokio tasks for the async path) and concatenated in sorted path order.

pub mod json;
pub mod parquet;

use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use indicatif::ParallelProgressIterator;
use itertools::Itertools;
use rayon::prelude::*;

use crate::config::EngineConfig;
use crate::error::util::validate_directory;
use crate::error::{InsightError, Result};
use crate::models::{RawRecord, RecordSnapshot};
use crate::utils::{LoadLog, create_main_progress_bar, create_spinner, finish_progress_bar};

pub use json::{parse_records, read_json_records, read_json_records_async};
pub use parquet::{batch_to_records, read_parquet_records, read_parquet_records_async};

/// File formats the loader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Array of JSON objects
    Json,
    /// Parquet file
    Parquet,
}

impl SourceFormat {
    /// Format implied by a file extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "parquet" | "pq" => Some(Self::Parquet),
            _ => None,
        }
    }
}

/// Where records are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSource {
    /// A single file
    File(PathBuf, SourceFormat),
    /// Every JSON and Parquet file directly inside a directory
    Directory(PathBuf),
}

impl RecordSource {
    /// Classify a path as a file or directory source
    pub fn detect(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.is_dir() {
            return Ok(Self::Directory(path));
        }
        match SourceFormat::from_path(&path) {
            Some(format) => Ok(Self::File(path, format)),
            None => Err(InsightError::UnsupportedSource(format!(
                "{} (expected .json, .parquet or a directory)",
                path.display()
            ))),
        }
    }

    /// The path of the source
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::File(path, _) | Self::Directory(path) => path,
        }
    }
}

/// Record files in a directory, sorted by path
pub fn find_record_files(dir: &Path) -> Result<Vec<(PathBuf, SourceFormat)>> {
    let log = LoadLog::start("Searching for record files", dir);
    validate_directory(dir, "record files")?;

    let files = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .filter(|path| path.is_file())
        .filter_map(|path| SourceFormat::from_path(&path).map(|format| (path, format)))
        .sorted_by(|a, b| a.0.cmp(&b.0))
        .collect_vec();

    log.files(files.len());
    Ok(files)
}

fn read_file(path: &Path, format: SourceFormat, batch_size: usize) -> Result<Vec<RawRecord>> {
    match format {
        SourceFormat::Json => read_json_records(path),
        SourceFormat::Parquet => read_parquet_records(path, batch_size),
    }
}

async fn read_file_async(
    path: &Path,
    format: SourceFormat,
    batch_size: usize,
) -> Result<Vec<RawRecord>> {
    match format {
        SourceFormat::Json => read_json_records_async(path).await,
        SourceFormat::Parquet => read_parquet_records_async(path, batch_size).await,
    }
}

/// Load raw records from a file or directory
pub fn load_raw_records(path: &Path, config: &EngineConfig) -> Result<Vec<RawRecord>> {
    match RecordSource::detect(path)? {
        RecordSource::File(path, format) => {
            let spinner = create_spinner(Some(&format!("Reading {}", path.display())));
            let records = read_file(&path, format, config.batch_size);
            finish_progress_bar(&spinner, Some("Record file read"));
            records
        }
        RecordSource::Directory(dir) => {
            let log = LoadLog::start("Loading record directory", &dir);
            let files = find_record_files(&dir)?;
            let pb = create_main_progress_bar(files.len() as u64, Some("Loading record files"));

            let per_file = files
                .par_iter()
                .progress_with(pb.clone())
                .map(|(path, format)| read_file(path, *format, config.batch_size))
                .collect::<Result<Vec<_>>>()?;
            finish_progress_bar(&pb, Some("Record files loaded"));

            let records = per_file.into_iter().flatten().collect_vec();
            log.records(records.len());
            Ok(records)
        }
    }
}

/// Load raw records from a file or directory asynchronously
pub async fn load_raw_records_async(path: &Path, config: &EngineConfig) -> Result<Vec<RawRecord>> {
    match RecordSource::detect(path)? {
        RecordSource::File(path, format) => read_file_async(&path, format, config.batch_size).await,
        RecordSource::Directory(dir) => {
            let log = LoadLog::start("Loading record directory asynchronously", &dir);
            let files = find_record_files(&dir)?;
            let per_file = try_join_all(
                files
                    .iter()
                    .map(|(path, format)| read_file_async(path, *format, config.batch_size)),
            )
            .await?;

            let records = per_file.into_iter().flatten().collect_vec();
            log.records(records.len());
            Ok(records)
        }
    }
}

/// Load a snapshot from patient and insight sources
///
/// Both sources are read in parallel.
pub fn load_snapshot(
    patients: &Path,
    insights: &Path,
    config: &EngineConfig,
) -> Result<RecordSnapshot> {
    let (patient_records, insight_records) = rayon::join(
        || load_raw_records(patients, config),
        || load_raw_records(insights, config),
    );
    Ok(RecordSnapshot::from_raw(
        &patient_records?,
        &insight_records?,
        config,
    ))
}

/// Load a snapshot from patient and insight sources asynchronously
pub async fn load_snapshot_async(
    patients: &Path,
    insights: &Path,
    config: &EngineConfig,
) -> Result<RecordSnapshot> {
    let (patient_records, insight_records) = tokio::try_join!(
        load_raw_records_async(patients, config),
        load_raw_records_async(insights, config),
    )?;
    Ok(RecordSnapshot::from_raw(
        &patient_records,
        &insight_records,
        config,
    ))
}
