// src/snapshot.rs

use anyhow::{Context, Result};
use tracing::{debug, instrument};

use crate::error::ScrapeError;
use crate::extract::extract_page;
use crate::schema::{merge_rankings, ReportingPeriod, Table};

/// One run's result: the period the ranking covers and the merged table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingSnapshot {
    pub period: ReportingPeriod,
    pub table: Table,
}

/// Turn the ranking page's HTML into a snapshot. Any layout mismatch is an
/// error; nothing is written here.
#[instrument(level = "info", skip(html), fields(html_len = html.len()))]
pub fn build_snapshot(html: &str) -> Result<RankingSnapshot> {
    let page = extract_page(html)?;

    let header = page
        .top20
        .headers
        .first()
        .ok_or_else(|| ScrapeError::MissingColumn("top20 header #0".to_string()))?;
    let period: ReportingPeriod = header
        .parse()
        .with_context(|| format!("parsing reporting period from {:?}", header))?;
    debug!(%period, "reporting period");

    let table = merge_rankings(page)?;
    Ok(RankingSnapshot { period, table })
}
