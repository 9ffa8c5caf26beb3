use serde::Deserialize;

/// Placeholder substituted with a letter in the fighter listing template
pub const LETTER_PLACEHOLDER: &str = "{letter}";

/// Main configuration structure for the scraper
///
/// Every section falls back to the built-in defaults, so an empty file (or no
/// file at all) crawls the public site with the baseline behaviour.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Upstream listing locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Listing of every completed event on a single page
    #[serde(rename = "events-url")]
    pub events_url: String,

    /// Fighter listing with a `{letter}` placeholder
    #[serde(rename = "fighters-url-template")]
    pub fighters_url_template: String,

    /// Letter buckets visited in order
    pub letters: String,
}

impl SiteConfig {
    /// Fighter listing URL for one letter bucket
    pub fn fighters_url(&self, letter: char) -> String {
        self.fighters_url_template
            .replace(LETTER_PLACEHOLDER, &letter.to_string())
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            events_url: "http://ufcstats.com/statistics/events/completed?page=all".to_string(),
            fighters_url_template: "http://ufcstats.com/statistics/fighters?char={letter}&page=all"
                .to_string(),
            letters: "abcdefghijklmnopqrstuvwxyz".to_string(),
        }
    }
}

/// Identity presented to the upstream site
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Static User-Agent header value
    pub identity: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            identity: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                       (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
        }
    }
}

/// What the crawl loop does when a single detail page fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageErrorPolicy {
    /// Stop the whole run on the first failure
    #[default]
    Abort,
    /// Log the failure and move on to the next link
    Skip,
}

/// Crawler behaviour configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Pause before each navigation (milliseconds)
    #[serde(rename = "request-delay")]
    pub request_delay: u64,

    /// Per-request timeout (seconds), covering connect and transfer
    pub timeout: u64,

    #[serde(rename = "on-page-error")]
    pub on_page_error: PageErrorPolicy,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_delay: 0,
            timeout: 30,
            on_page_error: PageErrorPolicy::Abort,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: "./fightstats.db".to_string(),
        }
    }
}
