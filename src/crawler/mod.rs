//! Crawler module for listing traversal and page access
//!
//! This module contains the core crawling logic, including:
//! - Page access through a browsing context (HTTP by default)
//! - Link harvesting from listing pages
//! - The event and fighter crawl loops

mod coordinator;
mod harvester;
mod page;

pub use coordinator::{CrawlSummary, Crawler};
pub use harvester::harvest_links;
pub use page::{build_http_client, BrowsingContext, HttpContext, HttpPage, PageAccessor};
