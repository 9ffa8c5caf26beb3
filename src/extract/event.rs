//! Event detail page extraction

use crate::extract::normalize::strip_label;
use crate::extract::{element_text, required_text, selector, TITLE_SELECTOR};
use crate::records::EventRecord;
use crate::ScrapeError;
use scraper::Html;

const DETAIL_ITEMS: &str = ".b-list__box-list .b-list__box-list-item";
const DATE_LABEL: &str = "Date:";
const LOCATION_LABEL: &str = "Location:";

/// Maps an event detail page to an [`EventRecord`]
///
/// The name comes from the highlighted title. Date and location come from
/// the details list; items with neither label are ignored and a label that
/// never appears leaves its field `None`. Text is passed through unparsed.
///
/// # Errors
///
/// [`ScrapeError::Extraction`] when the title element is missing or blank.
///
/// # Example
///
/// ```
/// use fightstats_scraper::extract::extract_event;
/// use scraper::Html;
///
/// let html = r#"<span class="b-content__title-highlight"> UFC 300 </span>"#;
/// let event = extract_event(&Html::parse_document(html)).unwrap();
/// assert_eq!(event.name, "UFC 300");
/// assert_eq!(event.date, None);
/// ```
pub fn extract_event(document: &Html) -> Result<EventRecord, ScrapeError> {
    let name = required_text(document, TITLE_SELECTOR)?;

    let mut event = EventRecord {
        name,
        ..EventRecord::default()
    };

    let items = selector(DETAIL_ITEMS)?;
    for item in document.select(&items) {
        let text = element_text(item);
        if let Some(date) = strip_label(&text, DATE_LABEL) {
            event.date = Some(date);
        } else if let Some(location) = strip_label(&text, LOCATION_LABEL) {
            event.location = Some(location);
        }
    }

    Ok(event)
}
