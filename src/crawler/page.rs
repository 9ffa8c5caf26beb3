//! Page access for the crawl loops
//!
//! This module defines the capabilities the crawler needs from a browsing
//! engine and provides the HTTP-backed implementation:
//! - Acquiring one page per crawl phase from a browsing context
//! - Navigating to absolute URLs
//! - Exposing the current document for DOM queries
//!
//! A page is released when it is dropped, so every exit path of a crawl phase
//! (success or `?`) closes it.

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::ScrapeError;
use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;
use std::time::Duration;
use url::Url;

/// A single navigable page
#[async_trait]
pub trait PageAccessor: Send {
    /// Loads the absolute `url`, replacing the current document
    async fn navigate(&mut self, url: &str) -> Result<(), ScrapeError>;

    /// URL of the currently loaded document
    fn current_url(&self) -> Option<&str>;

    /// Raw HTML of the currently loaded document
    fn content(&self) -> Result<&str, ScrapeError>;

    /// Parses the current document for selector queries
    fn document(&self) -> Result<Html, ScrapeError> {
        Ok(Html::parse_document(self.content()?))
    }
}

/// Source of pages; one is acquired for each crawl phase
pub trait BrowsingContext {
    type Page: PageAccessor;

    fn new_page(&self) -> Result<Self::Page, ScrapeError>;
}

/// Builds the HTTP client shared by every page of a context
///
/// The configured identity string is the only User-Agent sent.
///
/// # Example
///
/// ```no_run
/// use fightstats_scraper::config::{CrawlerConfig, UserAgentConfig};
/// use fightstats_scraper::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.identity.as_str())
        .timeout(Duration::from_secs(crawler.timeout))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Browsing context backed by a reqwest client
pub struct HttpContext {
    client: Client,
}

impl HttpContext {
    pub fn new(user_agent: &UserAgentConfig, crawler: &CrawlerConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            client: build_http_client(user_agent, crawler)?,
        })
    }
}

impl BrowsingContext for HttpContext {
    type Page = HttpPage;

    fn new_page(&self) -> Result<HttpPage, ScrapeError> {
        tracing::debug!("Opening page");
        Ok(HttpPage {
            client: self.client.clone(),
            url: None,
            body: None,
        })
    }
}

/// A page fetched over plain HTTP GET
pub struct HttpPage {
    client: Client,
    url: Option<Url>,
    body: Option<String>,
}

#[async_trait]
impl PageAccessor for HttpPage {
    async fn navigate(&mut self, url: &str) -> Result<(), ScrapeError> {
        let target = Url::parse(url).map_err(|e| ScrapeError::Navigation {
            url: url.to_string(),
            message: format!("invalid URL: {}", e),
        })?;
        let navigation_error = |message: String| ScrapeError::Navigation {
            url: target.to_string(),
            message,
        };

        let response = self
            .client
            .get(target.clone())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    navigation_error("request timeout".to_string())
                } else if e.is_connect() {
                    navigation_error("connection refused".to_string())
                } else {
                    navigation_error(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(navigation_error(format!("HTTP {}", status.as_u16())));
        }

        let final_url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| navigation_error(e.to_string()))?;

        self.url = Some(final_url);
        self.body = Some(body);
        Ok(())
    }

    fn current_url(&self) -> Option<&str> {
        self.url.as_ref().map(Url::as_str)
    }

    fn content(&self) -> Result<&str, ScrapeError> {
        self.body.as_deref().ok_or_else(|| ScrapeError::Extraction {
            url: String::new(),
            message: "no document loaded".to_string(),
        })
    }
}

impl Drop for HttpPage {
    fn drop(&mut self) {
        tracing::debug!(
            "Closing page (last url: {})",
            self.current_url().unwrap_or("none")
        );
    }
}
