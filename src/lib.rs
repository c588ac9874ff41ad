//! Download the monthly programming-language popularity ranking and store it
//! as `<save_dir>/<year>/<year>-<MM>.tsv`.
//!
//! Stages: [`fetch`] the page, [`extract`] its three ranking sections,
//! normalise rows ([`process`]), reconcile them into one table and write it
//! out ([`schema`]).

pub mod error;
pub mod extract;
pub mod fetch;
pub mod process;
pub mod schema;
pub mod snapshot;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::error;

pub use error::ScrapeError;
pub use fetch::FetchConfig;
pub use snapshot::{build_snapshot, RankingSnapshot};

/// Run the whole pipeline once.
///
/// A failed fetch is logged and yields `Ok(None)` with nothing written.
/// Layout, parsing and filesystem faults are returned as errors.
pub fn download<P: AsRef<Path>>(config: &FetchConfig, save_dir: P) -> Result<Option<PathBuf>> {
    let html = match fetch::fetch_page(config) {
        Ok(html) => html,
        Err(e) => {
            error!("Exception = {:#}", e);
            return Ok(None);
        }
    };

    let snapshot = build_snapshot(&html)?;
    let path = schema::write_snapshot(&snapshot, save_dir)?;
    Ok(Some(path))
}
