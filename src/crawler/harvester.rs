//! Link harvesting from listing pages
//!
//! Listing pages (all completed events, fighters by letter) render one table
//! row per entity. A row may carry an anchor to the entity's detail page.

use crate::extract::selector;
use crate::ScrapeError;
use scraper::Html;

const ROW_SELECTOR: &str = ".b-statistics__table-row";
const ANCHOR_SELECTOR: &str = ".b-link";

/// Extracts detail-page links from a listing document
///
/// # Rules
///
/// - Rows are visited in document order
/// - The first `.b-link` anchor of a row supplies its `href`
/// - Rows without an anchor, or whose anchor has no `href`, are skipped
/// - No deduplication and no URL normalization
///
/// # Example
///
/// ```
/// use fightstats_scraper::crawler::harvest_links;
/// use scraper::Html;
///
/// let html = r#"<table>
///   <tr class="b-statistics__table-row"><td><a class="b-link" href="A">a</a></td></tr>
///   <tr class="b-statistics__table-row"><td></td></tr>
///   <tr class="b-statistics__table-row"><td><a class="b-link" href="B">b</a></td></tr>
/// </table>"#;
/// let links = harvest_links(&Html::parse_document(html)).unwrap();
/// assert_eq!(links, vec!["A", "B"]);
/// ```
pub fn harvest_links(document: &Html) -> Result<Vec<String>, ScrapeError> {
    let rows = selector(ROW_SELECTOR)?;
    let anchor = selector(ANCHOR_SELECTOR)?;

    let links = document
        .select(&rows)
        .filter_map(|row| row.select(&anchor).next())
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .collect();

    Ok(links)
}
