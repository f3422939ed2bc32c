//! Error types for dictionary parsing and population.
//!
//! Every parse failure gets its own attributable variant wrapping the
//! offending raw line or field. `DictError` is `Clone` because a background
//! population failure is sticky: the same error instance is handed to every
//! caller that blocks on readiness, past or future.

use thiserror::Error;

/// Errors produced while parsing, loading or populating a dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DictError {
    /// `#! version=` value was not a decimal integer.
    #[error("version: expected number, got {0:?}")]
    Version(String),

    /// `#! subversion=` value was not a decimal integer.
    #[error("subversion: expected number, got {0:?}")]
    Subversion(String),

    /// `#! entries=` value was not a decimal integer.
    #[error("entries: expected number, got {0:?}")]
    Entries(String),

    /// `#! date=` value was not strict RFC3339.
    #[error("date: expected RFC3339 format, got {0:?}")]
    Date(String),

    /// The number of entry lines did not match the declared header count.
    #[error("loaded entries ({loaded}) != header entries ({declared})")]
    EntryCount { loaded: usize, declared: usize },

    /// Entry line without a `[pinyin]` bracket pair.
    #[error("expected '[pinyin]' format in {0:?}")]
    Brackets(String),

    /// Entry line whose text before `[` was not exactly two fields.
    #[error("expected two hanzi fields in {0:?}")]
    HanziFields(String),

    /// Download of the dictionary archive failed.
    #[error("download failed: {0}")]
    Fetch(String),

    /// Underlying file or stream error, message only so the variant stays
    /// cloneable for sticky propagation.
    #[error("i/o error: {0}")]
    Io(String),
}

impl From<std::io::Error> for DictError {
    fn from(err: std::io::Error) -> Self {
        DictError::Io(err.to_string())
    }
}
