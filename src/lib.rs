//! Fightstats scraper: event and fighter records from a combat-sports stats site
//!
//! This crate walks two listing graphs (completed events, and fighters
//! partitioned by starting letter), harvests detail-page links, maps each
//! detail page onto a typed record and appends it to a relational store.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod records;
pub mod storage;

use thiserror::Error;

/// Main error type for scraper operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Extraction failed for {url}: {message}")]
    Extraction { url: String, message: String },

    #[error("Cannot parse {field} value '{value}'")]
    Parse { field: &'static str, value: String },

    #[error("Persistence error: {0}")]
    Persistence(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl ScrapeError {
    /// Attaches the page URL to an extraction error raised without one
    pub(crate) fn at(self, page_url: &str) -> Self {
        match self {
            Self::Extraction { url, message } if url.is_empty() => Self::Extraction {
                url: page_url.to_string(),
                message,
            },
            other => other,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Crawler, CrawlSummary};
pub use records::{EventRecord, FighterRecord};
pub use storage::{SqliteStore, Store};
