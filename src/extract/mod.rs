//! Detail-page extractors
//!
//! This module maps parsed detail pages onto records:
//! - Event pages → [`EventRecord`](crate::records::EventRecord)
//! - Fighter pages → [`FighterRecord`](crate::records::FighterRecord)
//! - Shared label dictionary and sentinel handling in [`normalize`]
//!
//! Extractors never see a URL; errors they raise carry an empty `url` that the
//! crawler fills in.

mod event;
mod fighter;
pub mod normalize;

pub use event::extract_event;
pub use fighter::{extract_fighter, split_name};
pub use normalize::{Coercion, FighterField};

use crate::ScrapeError;
use scraper::{ElementRef, Html, Selector};

/// Highlighted page title shared by event and fighter pages
pub(crate) const TITLE_SELECTOR: &str = ".b-content__title-highlight";

/// Compiles a CSS selector
pub(crate) fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Extraction {
        url: String::new(),
        message: format!("invalid selector '{}': {:?}", css, e),
    })
}

/// Concatenated, trimmed text of an element
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Reads the trimmed text of the first element matching `css`
///
/// A missing element or blank text is an extraction error: both pages
/// require a non-empty title.
pub(crate) fn required_text(document: &Html, css: &str) -> Result<String, ScrapeError> {
    let selector = selector(css)?;
    let text = document
        .select(&selector)
        .next()
        .map(element_text)
        .ok_or_else(|| ScrapeError::Extraction {
            url: String::new(),
            message: format!("missing element '{}'", css),
        })?;

    if text.is_empty() {
        return Err(ScrapeError::Extraction {
            url: String::new(),
            message: format!("element '{}' has no text", css),
        });
    }

    Ok(text)
}
