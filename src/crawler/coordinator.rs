//! Crawler coordinator - traversal of the event and fighter listings
//!
//! Both crawl phases are a two-level loop:
//! - Outer: one listing page (the single "all events" page, or one page per letter)
//! - Inner: an explicit queue of detail links harvested from that listing
//!
//! Exactly one request is in flight at any time. There is no cursor: an
//! aborted run restarts from the first listing next time.

use crate::config::{Config, PageErrorPolicy};
use crate::crawler::harvester::harvest_links;
use crate::crawler::page::{BrowsingContext, PageAccessor};
use crate::extract::{extract_event, extract_fighter};
use crate::storage::Store;
use crate::ScrapeError;
use scraper::Html;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use url::Url;

/// Counters reported at the end of a crawl phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Listing pages loaded
    pub listings: usize,

    /// Detail pages attempted
    pub pages_visited: usize,

    /// Records handed to the store successfully
    pub records_saved: usize,

    /// Detail pages dropped under the skip policy
    pub pages_skipped: usize,
}

impl CrawlSummary {
    fn merge(&mut self, other: CrawlSummary) {
        self.listings += other.listings;
        self.pages_visited += other.pages_visited;
        self.records_saved += other.records_saved;
        self.pages_skipped += other.pages_skipped;
    }
}

/// Drives both crawl phases against a browsing context and a store
pub struct Crawler<C: BrowsingContext, S: Store> {
    config: Config,
    context: C,
    store: S,
}

impl<C: BrowsingContext, S: Store> Crawler<C, S> {
    /// Creates a crawler
    ///
    /// # Arguments
    ///
    /// * `config` - Listing URLs, pacing and failure policy
    /// * `context` - Source of pages, one per crawl phase
    /// * `store` - Sink receiving every extracted record
    pub fn new(config: Config, context: C, store: S) -> Self {
        Self {
            config,
            context,
            store,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Runs the event crawl followed by the fighter crawl
    pub async fn run(&mut self) -> Result<CrawlSummary, ScrapeError> {
        let mut summary = self.run_event_crawl().await?;
        summary.merge(self.run_fighter_crawl().await?);
        Ok(summary)
    }

    /// Crawls the completed-events listing and stores one row per event
    pub async fn run_event_crawl(&mut self) -> Result<CrawlSummary, ScrapeError> {
        tracing::info!("Starting event crawl");
        let start_time = Instant::now();
        let mut summary = CrawlSummary::default();
        let mut page = self.context.new_page()?;

        let listing_url = self.config.site.events_url.clone();
        let mut pending = self.load_listing(&mut page, &listing_url).await?;
        summary.listings += 1;

        while let Some(link) = pending.pop_front() {
            summary.pages_visited += 1;
            match self.process_event(&mut page, &link).await {
                Ok(()) => summary.records_saved += 1,
                Err(e) => self.handle_page_error(&link, e, &mut summary)?,
            }
        }

        tracing::info!(
            "Finished scraping events: {} saved, {} skipped in {:?}",
            summary.records_saved,
            summary.pages_skipped,
            start_time.elapsed()
        );
        Ok(summary)
    }

    /// Crawls the fighter listing once per configured letter, in order
    pub async fn run_fighter_crawl(&mut self) -> Result<CrawlSummary, ScrapeError> {
        tracing::info!("Starting fighter crawl");
        let start_time = Instant::now();
        let mut summary = CrawlSummary::default();
        let mut page = self.context.new_page()?;

        let letters: Vec<char> = self.config.site.letters.chars().collect();
        for letter in letters {
            let listing_url = self.config.site.fighters_url(letter);
            let mut pending = self.load_listing(&mut page, &listing_url).await?;
            summary.listings += 1;

            while let Some(link) = pending.pop_front() {
                summary.pages_visited += 1;
                match self.process_fighter(&mut page, &link).await {
                    Ok(()) => summary.records_saved += 1,
                    Err(e) => self.handle_page_error(&link, e, &mut summary)?,
                }
            }

            tracing::debug!(
                "Letter '{}' done, {} fighters saved so far",
                letter,
                summary.records_saved
            );
        }

        tracing::info!(
            "Finished scraping fighters: {} saved, {} skipped in {:?}",
            summary.records_saved,
            summary.pages_skipped,
            start_time.elapsed()
        );
        Ok(summary)
    }

    /// Loads a listing page and queues its detail links as absolute URLs
    ///
    /// Hrefs are joined onto the listing's final URL here, before any detail
    /// page replaces it as the current document.
    async fn load_listing(
        &self,
        page: &mut C::Page,
        url: &str,
    ) -> Result<VecDeque<String>, ScrapeError> {
        let document = self.load(page, url).await?;
        let links = harvest_links(&document).map_err(|e| e.at(url))?;
        tracing::info!("Harvested {} links from {}", links.len(), url);

        let base = page.current_url().unwrap_or(url);
        let base = Url::parse(base).map_err(|e| ScrapeError::Navigation {
            url: base.to_string(),
            message: format!("invalid URL: {}", e),
        })?;
        Ok(resolve_links(&base, links))
    }

    async fn process_event(&mut self, page: &mut C::Page, link: &str) -> Result<(), ScrapeError> {
        let document = self.load(page, link).await?;
        let event = extract_event(&document).map_err(|e| e.at(link))?;
        tracing::debug!("Extracted event '{}' from {}", event.name, link);
        self.store.insert_event(&event)?;
        Ok(())
    }

    async fn process_fighter(&mut self, page: &mut C::Page, link: &str) -> Result<(), ScrapeError> {
        let document = self.load(page, link).await?;
        let fighter = extract_fighter(&document).map_err(|e| e.at(link))?;
        tracing::debug!(
            "Extracted fighter '{} {}' from {}",
            fighter.first_name,
            fighter.last_name,
            link
        );
        self.store.insert_fighter(&fighter)?;
        Ok(())
    }

    /// Waits the configured delay, navigates, and parses the new document
    async fn load(&self, page: &mut C::Page, url: &str) -> Result<Html, ScrapeError> {
        let delay = self.config.crawler.request_delay;
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        tracing::debug!("Navigating to {}", url);
        page.navigate(url).await?;
        page.document().map_err(|e| e.at(url))
    }

    /// Applies the configured policy to a failed detail page
    fn handle_page_error(
        &self,
        link: &str,
        error: ScrapeError,
        summary: &mut CrawlSummary,
    ) -> Result<(), ScrapeError> {
        match self.config.crawler.on_page_error {
            PageErrorPolicy::Abort => {
                tracing::error!("Aborting crawl at {}: {}", link, error);
                Err(error)
            }
            PageErrorPolicy::Skip => {
                tracing::warn!("Skipping {}: {}", link, error);
                summary.pages_skipped += 1;
                Ok(())
            }
        }
    }
}

/// Joins each href onto `base`
///
/// An href that cannot be joined is queued as is; navigating to it fails
/// and goes through the page error policy like any other detail page.
fn resolve_links(base: &Url, links: Vec<String>) -> VecDeque<String> {
    links
        .into_iter()
        .map(|href| match base.join(&href) {
            Ok(resolved) => resolved.to_string(),
            Err(e) => {
                tracing::warn!("Cannot resolve link '{}' against {}: {}", href, base, e);
                href
            }
        })
        .collect()
}
