//! Listing paginator
//!
//! Walks the result pages of one target URL, page by page, and collects the ad
//! links that survive classification. Pages are fetched strictly in order; the
//! scan ends at the page bound, at the site's last page, at the first page
//! without listings, or at the first failed fetch, whichever comes first.

use crate::crawler::document::{find_within, inline_text, Document};
use crate::crawler::fetcher::{FetchFailure, Fetcher};
use crate::crawler::selectors::ListingSelectors;
use crate::state::PageState;
use crate::url::{classify_link, netloc, normalize_target, page_url, LinkVerdict};
use crate::RadarError;
use std::collections::BTreeSet;

/// Why a scan stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The configured page bound was reached
    MaxPagesReached,
    /// The site's pagination list says there are no further pages
    LastPageReached,
    /// A page had no listing containers: end of results or changed markup
    NoListings { page: u32 },
    /// A page could not be fetched
    FetchFailed(FetchFailure),
}

/// Outcome of scanning one target
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Unique ad URLs collected across all scanned pages
    pub links: BTreeSet<String>,
    /// Pages whose listings were processed
    pub pages_scanned: u32,
    pub stop: StopReason,
}

/// Per-page link tallies, logged after each page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageTally {
    pub containers: usize,
    pub links_found: usize,
    pub without_href: usize,
    pub not_internal: usize,
    pub not_relevant: usize,
    pub unresolvable: usize,
    pub added: usize,
    pub fallback_anchors: usize,
}

/// What one results page yielded
#[derive(Debug, Clone, Default)]
pub struct PageHarvest {
    /// Accepted ad URLs in page order (may repeat)
    pub links: Vec<String>,
    /// Last page number advertised by the pagination list
    pub last_page: Option<u32>,
    pub tally: PageTally,
}

/// Scans listing pages of the configured marketplace
#[derive(Debug, Clone)]
pub struct ListingPaginator {
    fetcher: Fetcher,
    selectors: ListingSelectors,
    scheme: String,
    domain: String,
}

impl ListingPaginator {
    /// Creates a paginator for `scheme://domain`
    pub fn new(fetcher: Fetcher, scheme: &str, domain: &str) -> Result<Self, RadarError> {
        Ok(Self {
            fetcher,
            selectors: ListingSelectors::new()?,
            scheme: scheme.to_string(),
            domain: domain.to_lowercase(),
        })
    }

    /// Collects the ad URLs found on the first `max_pages` pages of `target`
    ///
    /// # Errors
    ///
    /// Returns `RadarError::InvalidTargetDomain` before any request is made
    /// when the target is not on the configured domain. Fetch failures and
    /// empty pages end the scan early but are not errors.
    pub async fn scrape_ad_urls(
        &self,
        target: &str,
        max_pages: u32,
    ) -> Result<BTreeSet<String>, RadarError> {
        Ok(self.scan(target, max_pages).await?.links)
    }

    /// Like `scrape_ad_urls`, also reporting how far the scan went and why it stopped
    pub async fn scan(&self, target: &str, max_pages: u32) -> Result<ScanReport, RadarError> {
        let base = self.validate_target(target)?;
        let max_pages = max_pages.max(1);

        tracing::info!(
            "Scanning {} (query dropped: {}, max pages: {})",
            base,
            target.contains('?'),
            max_pages
        );

        let mut state = PageState::new();
        let mut pages_scanned = 0;

        let stop = loop {
            let page = state.current_page();
            let url = page_url(&base, page);
            tracing::debug!("Fetching page {}: {}", page, url);

            let body = match self.fetcher.fetch_html(&url).await {
                Ok(body) => body,
                Err(failure) => {
                    tracing::warn!("Failed to fetch page {} ({}), stopping", page, failure);
                    break StopReason::FetchFailed(failure);
                }
            };

            let harvest = self.harvest_page(&body, page);
            if harvest.tally.containers == 0 {
                tracing::warn!(
                    "No ads found on page {} with selector '{}' - end of results or the markup changed",
                    page,
                    crate::crawler::selectors::LISTING_CONTAINER
                );
                break StopReason::NoListings { page };
            }

            pages_scanned += 1;
            let mut tally = harvest.tally;
            for link in harvest.links {
                if state.add_link(link) {
                    tally.added += 1;
                }
            }
            state.observe_last_page(harvest.last_page);

            tracing::info!(
                "Page {} stats: {} ads, {} links found, {} without href, {} not internal, {} not relevant, {} URLs added",
                page,
                tally.containers,
                tally.links_found,
                tally.without_href,
                tally.not_internal,
                tally.not_relevant,
                tally.added
            );

            if state.reached_max(max_pages) {
                tracing::info!("Reached max pages limit ({}), stopping", max_pages);
                break StopReason::MaxPagesReached;
            }

            if state.reached_last() {
                tracing::info!("Page {} is the last results page, stopping", page);
                break StopReason::LastPageReached;
            }

            state = state.next_page();
        };

        let links = state.into_links();
        tracing::info!(
            "Total ads scraped from {} page(s) of {}: {}",
            pages_scanned,
            base,
            links.len()
        );

        Ok(ScanReport {
            links,
            pages_scanned,
            stop,
        })
    }

    /// Checks the target's domain and returns its normalized form
    pub fn validate_target(&self, target: &str) -> Result<String, RadarError> {
        let base = normalize_target(target);
        match netloc(&base) {
            Some(found) if found == self.domain => Ok(base),
            _ => Err(RadarError::InvalidTargetDomain {
                url: target.to_string(),
                expected: self.domain.clone(),
            }),
        }
    }

    /// Extracts ad links and the advertised last page from one results page
    ///
    /// Links appear in page order and may repeat; `tally.added` is left for
    /// the caller, which owns deduplication.
    pub fn harvest_page(&self, body: &str, page: u32) -> PageHarvest {
        let document = Document::parse(body);
        let mut harvest = PageHarvest {
            last_page: self.last_page(&document),
            ..PageHarvest::default()
        };

        let containers = document.select_all(&self.selectors.container);
        harvest.tally.containers = containers.len();

        for container in containers {
            let anchor = match find_within(container, &self.selectors.anchor) {
                Some(anchor) => anchor,
                None => match find_within(container, &self.selectors.any_anchor) {
                    Some(anchor) => {
                        harvest.tally.fallback_anchors += 1;
                        anchor
                    }
                    None => continue,
                },
            };
            harvest.tally.links_found += 1;

            let Some(href) = anchor.value().attr("href") else {
                harvest.tally.without_href += 1;
                continue;
            };

            match classify_link(href, &self.scheme, &self.domain) {
                LinkVerdict::Accepted(url) => harvest.links.push(url),
                LinkVerdict::NotInternal => {
                    harvest.tally.not_internal += 1;
                    tracing::debug!("Skipped non-internal URL: {}", href);
                }
                LinkVerdict::NotRelevant => {
                    harvest.tally.not_relevant += 1;
                    tracing::debug!("Skipped non-relevant URL (has query params): {}", href);
                }
                LinkVerdict::Unresolvable => {
                    harvest.tally.unresolvable += 1;
                    tracing::debug!("Skipped unresolvable URL: {}", href);
                }
            }
        }

        if harvest.tally.fallback_anchors > 0 {
            tracing::warn!(
                "{} link(s) on page {} found without the expected anchor class - the markup may have changed",
                harvest.tally.fallback_anchors,
                page
            );
        }

        harvest
    }

    /// Reads the last page number from the pagination list
    fn last_page(&self, document: &Document) -> Option<u32> {
        document
            .select_all(&self.selectors.pagination_item)
            .last()
            .and_then(|item| inline_text(*item).parse::<u32>().ok())
    }
}
