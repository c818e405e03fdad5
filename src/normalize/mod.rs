//! Identifier normalization
//!
//! Canonical forms for ZIP codes and category labels, plus the field alias
//! table used to read loosely-typed records.

pub mod aliases;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use aliases::{DEFAULT_FIELD_ALIASES, FieldAlias, FieldAliases, RecordField};

/// Sentinel used for absent demographic values in breakdowns
pub const UNKNOWN: &str = "Unknown";

/// Number of digits in a canonical ZIP code
pub const ZIP_LENGTH: usize = 5;

/// A five-digit ZIP code in canonical form
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZipCode(String);

impl ZipCode {
    /// The canonical five-digit string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ZipCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize a raw ZIP-like string
///
/// Anything after the first `-` is discarded, non-digits are stripped and
/// the result is left-padded with zeros to five digits. A nine-digit value
/// (ZIP+4 written without the delimiter) keeps its first five digits.
///
/// Returns `None` when nothing usable remains; such records are excluded
/// from geographic aggregation.
#[must_use]
pub fn normalize_zip(raw: &str) -> Option<ZipCode> {
    let prefix = raw.split('-').next().unwrap_or_default();
    let digits: String = prefix.chars().filter(char::is_ascii_digit).collect();

    match digits.len() {
        0 => None,
        len if len <= ZIP_LENGTH => Some(ZipCode(format!("{digits:0>5}"))),
        9 => Some(ZipCode(digits[..ZIP_LENGTH].to_string())),
        _ => None,
    }
}

/// Normalize a category label
///
/// Trims surrounding whitespace and collapses internal runs of whitespace to
/// a single space. Case is preserved: clinical vocabulary is compared
/// exactly.
#[must_use]
pub fn normalize_label(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a label, treating blank input as absent
#[must_use]
pub fn normalize_label_opt(raw: &str) -> Option<String> {
    let label = normalize_label(raw);
    if label.is_empty() { None } else { Some(label) }
}
