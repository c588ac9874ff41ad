// src/process/mod.rs
//
// Row normalisation: turn `<tr>` elements into rows of plain strings.

pub mod raw_table;

pub use raw_table::RawTable;

use anyhow::Result;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use tracing::trace;

use crate::error::ScrapeError;

static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("td selector"));
static IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img").expect("img selector"));

/// Top-20 cell holding the trend arrow, rendered as an `<img>`.
pub const TREND_CELL: usize = 2;
/// Top-20 cell holding the language logo; the other table has no such column.
pub const LOGO_CELL: usize = 3;

/// Trimmed text content of a cell.
pub fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// `".../images/icons/up.png"` → `"up"`.
pub fn icon_name(src: &str) -> String {
    let file = src.rsplit('/').next().unwrap_or(src);
    file.split('.').next().unwrap_or_default().to_string()
}

/// Normalise one row of the top-20 table.
///
/// Position is the only signal for the two special cells: the trend cell
/// yields its icon name when it carries an image, and the logo cell is
/// dropped. A row with fewer cells than usual simply yields a shorter row.
pub fn parse_ranked_row(tr: ElementRef<'_>) -> Result<Vec<String>> {
    let mut out = Vec::new();
    for (i, td) in tr.select(&CELL).enumerate() {
        match i {
            TREND_CELL => match td.select(&IMG).next() {
                Some(img) => {
                    let src = img
                        .value()
                        .attr("src")
                        .ok_or(ScrapeError::MissingAttribute {
                            element: "img",
                            attribute: "src",
                        })?;
                    trace!(src, "trend icon");
                    out.push(icon_name(src));
                }
                None => out.push(cell_text(td)),
            },
            LOGO_CELL => continue,
            _ => out.push(cell_text(td)),
        }
    }
    Ok(out)
}

/// Normalise one row of a plain table: every cell as trimmed text.
pub fn parse_plain_row(tr: ElementRef<'_>) -> Vec<String> {
    tr.select(&CELL).map(cell_text).collect()
}
