// src/schema/merge.rs

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::error::ScrapeError;
use crate::extract::RankingPage;

/// Column naming the language; emitted first in every snapshot.
pub const KEY_COLUMN: &str = "Programming Language";

/// Label given to the top-20 trend column, which the page titles "Change"
/// just like the share-delta column.
pub const POSITION_COLUMN: &str = "Position#";

const POSITION_HEADER_INDEX: usize = 2;

/// An ordered set of named columns and rows aligned to them.
///
/// Every row has exactly `columns.len()` cells; absent values are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell of `row` under column `name`.
    pub fn get(&self, row: usize, name: &str) -> Option<&str> {
        let col = self.column_index(name)?;
        self.rows.get(row).map(|r| r[col].as_str())
    }

    /// Append `rows` laid out as `headers`, matching columns by name.
    ///
    /// Unknown headers become new trailing columns (existing rows get empty
    /// cells). Short rows leave their missing columns empty; cells past the
    /// end of `headers` are dropped. A name repeated within `headers` is an
    /// error, since both cells would land in one column.
    pub fn stack<I>(&mut self, headers: &[String], rows: I) -> Result<()>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        if let Some(dup) = headers
            .iter()
            .enumerate()
            .find_map(|(i, h)| headers[..i].contains(h).then_some(h))
        {
            return Err(ScrapeError::DuplicateColumn(dup.clone()).into());
        }

        let mapping: Vec<usize> = headers
            .iter()
            .map(|h| match self.column_index(h) {
                Some(i) => i,
                None => {
                    self.columns.push(h.clone());
                    for row in &mut self.rows {
                        row.push(String::new());
                    }
                    self.columns.len() - 1
                }
            })
            .collect();

        for row in rows {
            let mut aligned = vec![String::new(); self.columns.len()];
            let width = row.len();
            for (pos, value) in row.into_iter().enumerate() {
                match mapping.get(pos) {
                    Some(&col) => aligned[col] = value,
                    None => {
                        warn!(cells = width, columns = headers.len(), "dropping cells past header");
                        break;
                    }
                }
            }
            self.rows.push(aligned);
        }
        Ok(())
    }

    /// Drop rows with an empty `name` cell. Returns how many were dropped.
    pub fn retain_non_empty(&mut self, name: &str) -> usize {
        let Some(col) = self.column_index(name) else {
            return 0;
        };
        let before = self.rows.len();
        self.rows.retain(|r| !r[col].is_empty());
        before - self.rows.len()
    }

    /// Same table with `name` moved to the front; other columns keep their order.
    pub fn with_leading_column(&self, name: &str) -> Result<Table> {
        let lead = self
            .column_index(name)
            .ok_or_else(|| ScrapeError::MissingColumn(name.to_string()))?;
        let order: Vec<usize> = std::iter::once(lead)
            .chain((0..self.columns.len()).filter(|&i| i != lead))
            .collect();
        Ok(Table {
            columns: order.iter().map(|&i| self.columns[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|r| order.iter().map(|&i| r[i].clone()).collect())
                .collect(),
        })
    }
}

/// Reconcile the page's sections into one table keyed by [`KEY_COLUMN`].
///
/// - top-20 header 2 becomes [`POSITION_COLUMN`];
/// - the other-languages rank header takes the top-20 rank header's name;
/// - overflow names get synthesized ranks continuing after the stacked rows,
///   filling only the other-languages' first two columns.
pub fn merge_rankings(page: RankingPage) -> Result<Table> {
    let RankingPage {
        top20,
        others,
        overflow,
    } = page;

    let mut top_headers = top20.headers;
    let slot = top_headers
        .get_mut(POSITION_HEADER_INDEX)
        .ok_or_else(|| ScrapeError::MissingColumn(format!("top20 header #{}", POSITION_HEADER_INDEX)))?;
    *slot = POSITION_COLUMN.to_string();

    let mut other_headers = others.headers;
    let rank_header = top_headers
        .first()
        .cloned()
        .ok_or_else(|| ScrapeError::MissingColumn("top20 header #0".to_string()))?;
    let first = other_headers
        .first_mut()
        .ok_or_else(|| ScrapeError::MissingColumn("otherPL header #0".to_string()))?;
    *first = rank_header;

    let mut table = Table::new();
    table.stack(&top_headers, top20.rows)?;
    table.stack(&other_headers, others.rows)?;

    if table.column_index(KEY_COLUMN).is_none() {
        return Err(ScrapeError::MissingColumn(KEY_COLUMN.to_string()).into());
    }
    let dropped = table.retain_non_empty(KEY_COLUMN);
    if dropped > 0 {
        warn!(dropped, "rows without a language name");
    }

    if let Some(names) = overflow {
        if other_headers.len() < 2 {
            return Err(ScrapeError::MissingColumn("otherPL header #1".to_string()).into());
        }
        let start = table.len();
        info!(count = names.len(), first_rank = start + 1, "overflow names");
        let rows = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| vec![(start + i + 1).to_string(), name]);
        table.stack(&other_headers[..2], rows)?;
    }

    debug!(rows = table.len(), columns = table.columns().len(), "merged");
    table.with_leading_column(KEY_COLUMN)
}
