//! Normalized records produced by the extractors
//!
//! Records are built once per detail-page visit, handed to the store and then
//! dropped. They carry no identity key.

/// One completed event as shown on its detail page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventRecord {
    /// Event title, trimmed and never empty
    pub name: String,

    /// Date text exactly as scraped (e.g. "January 1, 2025")
    pub date: Option<String>,

    /// Venue location text
    pub location: Option<String>,
}

/// One fighter's profile and career statistics
///
/// Every optional field is either a fully parsed value or `None`. `None`
/// covers both "label missing from the page" and "site placeholder shown".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FighterRecord {
    pub first_name: String,
    pub last_name: String,

    /// Raw height text, e.g. `5' 11"`
    pub height: Option<String>,

    /// Pounds
    pub weight: Option<i32>,

    /// Inches
    pub reach: Option<i32>,

    pub stance: Option<String>,

    /// Significant strikes landed per minute
    pub slpm: Option<f64>,

    /// Striking accuracy as a fraction in `[0, 1]`
    pub str_acc: Option<f64>,

    /// Significant strikes absorbed per minute
    pub sapm: Option<f64>,

    /// Striking defence as a fraction in `[0, 1]`
    pub str_def: Option<f64>,

    /// Takedowns per 15 minutes
    pub td_avg: Option<f64>,

    /// Takedown accuracy as a fraction in `[0, 1]`
    pub td_acc: Option<f64>,

    /// Takedown defence as a fraction in `[0, 1]`
    pub td_def: Option<f64>,

    /// Submission attempts per 15 minutes
    pub sub_avg: Option<f64>,
}

impl FighterRecord {
    /// Builds a record with only the name fields set
    pub fn named(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }
}
