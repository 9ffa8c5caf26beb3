//! Fighter detail page extraction

use crate::extract::normalize::FighterField;
use crate::extract::{element_text, required_text, selector, TITLE_SELECTOR};
use crate::records::FighterRecord;
use crate::ScrapeError;
use scraper::{ElementRef, Html};

const NAME_SELECTOR: &str = ".b-statistics__section_details";
const STATS_CONTAINER: &str = ".b-fight-details";
const STATS_ITEM: &str = "li";

/// Splits a display name into first name and the trimmed remainder
///
/// ```
/// use fightstats_scraper::extract::split_name;
///
/// assert_eq!(split_name("Jon Jones"), ("Jon", "Jones"));
/// assert_eq!(split_name("Shogun"), ("Shogun", ""));
/// ```
pub fn split_name(full_name: &str) -> (&str, &str) {
    match full_name.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim()),
        None => (full_name, ""),
    }
}

/// Maps a fighter detail page to a [`FighterRecord`]
///
/// Each list item in the fight-details section is read as a label (its
/// first child element) and a value (its last child node). Labels are
/// resolved through [`FighterField::classify`]; unrecognized labels are
/// skipped. Categories missing from the page stay `None`.
///
/// # Errors
///
/// * [`ScrapeError::Extraction`] - the name title is missing or blank
/// * [`ScrapeError::Parse`] - a value is neither the sentinel nor well formed
pub fn extract_fighter(document: &Html) -> Result<FighterRecord, ScrapeError> {
    let full_name = required_text(
        document,
        &format!("{} {}", NAME_SELECTOR, TITLE_SELECTOR),
    )?;
    let (first_name, last_name) = split_name(&full_name);
    let mut fighter = FighterRecord::named(first_name, last_name);

    let container = selector(STATS_CONTAINER)?;
    let Some(details) = document.select(&container).next() else {
        tracing::debug!("No fight-details section for {}", full_name);
        return Ok(fighter);
    };

    let items = selector(STATS_ITEM)?;
    for item in details.select(&items) {
        let Some((label, value)) = label_and_value(item) else {
            continue;
        };

        match FighterField::classify(&label) {
            Some(field) => field.apply(&mut fighter, &value)?,
            None if label.is_empty() => {}
            None => tracing::debug!("Ignoring unrecognized label '{}'", label),
        }
    }

    Ok(fighter)
}

/// Label text of the first child element and text of the last child node
fn label_and_value(item: ElementRef<'_>) -> Option<(String, String)> {
    let label_element = item.children().find_map(ElementRef::wrap)?;
    let label = element_text(label_element);

    let value = match item.last_child() {
        Some(node) if node.id() == label_element.id() => String::new(),
        Some(node) => match node.value().as_text() {
            Some(text) => text.trim().to_string(),
            None => ElementRef::wrap(node).map(element_text).unwrap_or_default(),
        },
        None => String::new(),
    };

    Some((label, value))
}
