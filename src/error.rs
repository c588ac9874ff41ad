// src/error.rs

use thiserror::Error;

/// Faults raised when the ranking page no longer has the layout we expect.
///
/// These are never retried: they mean the upstream page changed and the
/// scraper needs updating.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScrapeError {
    #[error("element not found: {0}")]
    MissingElement(&'static str),

    #[error("attribute `{attribute}` not found on <{element}>")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("column not found: {0}")]
    MissingColumn(String),

    #[error("column appears twice in one header: {0}")]
    DuplicateColumn(String),

    #[error("unknown month abbreviation: {0:?}")]
    UnknownMonth(String),

    #[error("malformed reporting period header: {0:?}")]
    MalformedPeriod(String),
}
