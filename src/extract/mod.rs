// src/extract/mod.rs

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument};

use crate::error::ScrapeError;
use crate::process::{self, RawTable};

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("CSS selector should be valid")
}

static ARTICLE: Lazy<Selector> = Lazy::new(|| selector("article"));
static TOP20: Lazy<Selector> = Lazy::new(|| selector("table#top20"));
static OTHERS: Lazy<Selector> = Lazy::new(|| selector("table#otherPL"));
static THEAD: Lazy<Selector> = Lazy::new(|| selector("thead"));
static ROW: Lazy<Selector> = Lazy::new(|| selector("tr"));
static HEADER_CELL: Lazy<Selector> = Lazy::new(|| selector("th"));
static TBODY: Lazy<Selector> = Lazy::new(|| selector("tbody"));
static LIST: Lazy<Selector> = Lazy::new(|| selector("ul"));
static ITEM: Lazy<Selector> = Lazy::new(|| selector("li"));

/// The three ranking sections of the page, before any reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingPage {
    /// Leading languages: current and previous rank, trend, name, share.
    pub top20: RawTable,
    /// Ranks 21-50 with a smaller column set.
    pub others: RawTable,
    /// Names ranked 51 and beyond, in order. `None` when the page has no list.
    pub overflow: Option<Vec<String>>,
}

/// Locate and normalise the ranking sections of `html`.
#[instrument(level = "debug", skip(html), fields(html_len = html.len()))]
pub fn extract_page(html: &str) -> Result<RankingPage> {
    let doc = Html::parse_document(html);
    let article = doc
        .select(&ARTICLE)
        .next()
        .ok_or(ScrapeError::MissingElement("article"))?;

    info!("Parse top20");
    let table = find(article, &TOP20, "table#top20")?;
    let top20 = RawTable::new(
        headers(table, "table#top20")?,
        rows(table, "table#top20", process::parse_ranked_row)?,
    );
    debug!(columns = top20.headers.len(), rows = top20.rows.len(), "top20");

    info!("Parse top50");
    let table = find(article, &OTHERS, "table#otherPL")?;
    let others = RawTable::new(
        headers(table, "table#otherPL")?,
        rows(table, "table#otherPL", |tr| Ok(process::parse_plain_row(tr)))?,
    );
    debug!(columns = others.headers.len(), rows = others.rows.len(), "others");

    info!("Parse top100");
    let overflow = overflow_names(article);
    debug!(names = overflow.as_ref().map_or(0, Vec::len), "overflow");

    Ok(RankingPage {
        top20,
        others,
        overflow,
    })
}

fn find<'a>(scope: ElementRef<'a>, sel: &Selector, what: &'static str) -> Result<ElementRef<'a>> {
    scope
        .select(sel)
        .next()
        .ok_or_else(|| ScrapeError::MissingElement(what).into())
}

/// Trimmed text of every `th` in every header row.
fn headers(table: ElementRef<'_>, what: &'static str) -> Result<Vec<String>> {
    let thead = table
        .select(&THEAD)
        .next()
        .ok_or(ScrapeError::MissingElement("thead"))
        .with_context(|| format!("reading headers of {}", what))?;
    Ok(thead
        .select(&ROW)
        .flat_map(|tr| tr.select(&HEADER_CELL))
        .map(process::cell_text)
        .collect())
}

fn rows<F>(table: ElementRef<'_>, what: &'static str, parse: F) -> Result<Vec<Vec<String>>>
where
    F: Fn(ElementRef<'_>) -> Result<Vec<String>>,
{
    let tbody = table
        .select(&TBODY)
        .next()
        .ok_or(ScrapeError::MissingElement("tbody"))
        .with_context(|| format!("reading rows of {}", what))?;

    let mut out = Vec::new();
    for tr in tbody.select(&ROW) {
        let row = parse(tr).with_context(|| format!("parsing row of {}", what))?;
        if row.is_empty() {
            continue;
        }
        out.push(row);
    }
    Ok(out)
}

/// First item of the first list in the article: `"Lua, Scratch, Ada"`.
/// Blank entries are skipped so every overflow row carries a name.
fn overflow_names(article: ElementRef<'_>) -> Option<Vec<String>> {
    let item = article.select(&LIST).next()?.select(&ITEM).next()?;
    let text = process::cell_text(item);
    let names: Vec<String> = text
        .split(", ")
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    if names.is_empty() {
        return None;
    }
    Some(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../../tests/fixtures/tiobe_index.html");

    fn missing(err: &anyhow::Error) -> Option<&ScrapeError> {
        err.downcast_ref::<ScrapeError>()
    }

    #[test]
    fn extracts_all_three_sections() {
        let page = extract_page(FIXTURE).unwrap();

        assert_eq!(
            page.top20.headers,
            vec![
                "Oct 2025",
                "Oct 2024",
                "Change",
                "Programming Language",
                "Ratings",
                "Change"
            ]
        );
        assert_eq!(
            page.top20.rows,
            vec![
                vec!["1", "1", "", "Python", "24.45%", "+2.55%"],
                vec!["2", "4", "up", "C", "9.29%", "+0.91%"],
                vec!["3", "2", "down", "C++", "8.84%", "-1.87%"],
            ]
        );

        assert_eq!(
            page.others.headers,
            vec!["Position", "Programming Language", "Ratings"]
        );
        assert_eq!(page.others.rows.len(), 3);
        assert_eq!(page.others.rows[0], vec!["21", "Kotlin", "0.94%"]);

        // The navigation list outside the article must not be picked up.
        assert_eq!(
            page.overflow,
            Some(vec!["Lua".to_string(), "Scratch".to_string(), "Ada".to_string()])
        );
    }

    #[test]
    fn missing_article_is_structural_error() {
        let err = extract_page("<html><body><table id=\"top20\"></table></body></html>")
            .unwrap_err();
        assert_eq!(missing(&err), Some(&ScrapeError::MissingElement("article")));
    }

    #[test]
    fn missing_other_languages_table_is_structural_error() {
        let html = FIXTURE.replace("id=\"otherPL\"", "id=\"renamed\"");
        let err = extract_page(&html).unwrap_err();
        assert_eq!(
            missing(&err),
            Some(&ScrapeError::MissingElement("table#otherPL"))
        );
    }

    #[test]
    fn table_without_thead_is_structural_error() {
        let html = r#"<article>
            <table id="top20"><tr><td>1</td></tr></table>
            <table id="otherPL"><thead><tr><th>Position</th></tr></thead></table>
        </article>"#;
        let err = extract_page(html).unwrap_err();
        assert_eq!(missing(&err), Some(&ScrapeError::MissingElement("thead")));
    }

    #[test]
    fn overflow_is_absent_without_list() {
        let start = FIXTURE.find("<h2>The Next 50").unwrap();
        let end = start + FIXTURE[start..].find("</ul>").unwrap() + "</ul>".len();
        let mut html = FIXTURE.to_string();
        html.replace_range(start..end, "");

        let page = extract_page(&html).unwrap();
        assert_eq!(page.overflow, None);
        assert_eq!(page.others.rows.len(), 3);
    }

    #[test]
    fn blank_overflow_entries_are_skipped() {
        let html = FIXTURE.replace("<li>Lua, Scratch, Ada</li>", "<li>Lua, , Ada</li>");
        assert_eq!(
            extract_page(&html).unwrap().overflow,
            Some(vec!["Lua".to_string(), "Ada".to_string()])
        );
    }

    #[test]
    fn blank_overflow_item_is_absent() {
        let html = FIXTURE.replace("<li>Lua, Scratch, Ada</li>", "<li>  </li>");
        assert_eq!(extract_page(&html).unwrap().overflow, None);
    }
}
