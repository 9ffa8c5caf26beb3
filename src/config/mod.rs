//! Configuration module for the scraper
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Missing keys fall back to the public site defaults.
//!
//! # Example
//!
//! ```no_run
//! use fightstats_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("Letters visited: {}", config.site.letters);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, PageErrorPolicy, SiteConfig, UserAgentConfig,
    LETTER_PLACEHOLDER,
};

// Re-export parser functions
pub use parser::{load_config, load_or_default, parse_config};
