//! Crawler module for listing discovery and ad extraction
//!
//! This module contains the scraping pipeline:
//! - Paced HTTP fetching with browser-like headers
//! - A queryable HTML document model
//! - Listing pagination and ad link harvesting
//! - Ad field extraction through ordered selector chains
//! - Bounded-concurrency extraction over many ad URLs

mod coordinator;
mod document;
mod extractor;
mod fetcher;
mod paginator;
pub mod selectors;

pub use coordinator::extract_all;
pub use document::{block_text, compile_selector, find_within, inline_text, Document};
pub use extractor::{AdExtractor, AdRecord};
pub use fetcher::{build_http_client, FetchFailure, Fetcher, DEFAULT_USER_AGENT};
pub use paginator::{ListingPaginator, PageHarvest, PageTally, ScanReport, StopReason};

use crate::config::Config;
use crate::RadarError;

/// Builds the paginator and extractor described by the configuration
///
/// Both share one HTTP client.
///
/// # Returns
///
/// * `Ok((ListingPaginator, AdExtractor))` - Ready to scan and extract
/// * `Err(RadarError)` - The HTTP client or a selector table could not be built
pub fn build_pipeline(config: &Config) -> Result<(ListingPaginator, AdExtractor), RadarError> {
    let fetcher = Fetcher::new(&config.scraper)?;
    let paginator = ListingPaginator::new(fetcher.clone(), &config.site.scheme, &config.site.domain)?;
    let extractor = AdExtractor::new(fetcher, &config.scraper.currency_markers)?;
    Ok((paginator, extractor))
}
