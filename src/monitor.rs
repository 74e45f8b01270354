//! Monitoring run orchestration
//!
//! One run walks the targets in order. For each target it scans the listing
//! pages, drops ads the store has already seen, extracts the rest concurrently,
//! sends a digest when anything was extracted and finally records every new
//! ad URL so it is never offered again.

use crate::config::Config;
use crate::crawler::{build_pipeline, extract_all, AdExtractor, AdRecord, ListingPaginator, StopReason};
use crate::notify::{build_digest, Notifier};
use crate::storage::{RunCounters, RunStatus, Storage};
use crate::RadarError;

/// Outcome of processing one target
#[derive(Debug, Clone)]
pub struct TargetReport {
    pub target: String,
    /// Why the listing scan stopped
    pub stop: StopReason,
    /// Ads that made it into the digest
    pub records: Vec<AdRecord>,
    /// False when a digest was due but could not be delivered; its ads are
    /// recorded all the same
    pub delivered: bool,
    pub counters: RunCounters,
}

/// Runs the scan / dedup / extract / notify cycle over a list of targets
pub struct Monitor<S: Storage> {
    paginator: ListingPaginator,
    extractor: AdExtractor,
    notifier: Notifier,
    storage: S,
    max_pages: u32,
    workers: usize,
}

impl<S: Storage> Monitor<S> {
    /// Builds a monitor from the configuration and an opened store
    pub fn new(config: &Config, storage: S) -> Result<Self, RadarError> {
        let (paginator, extractor) = build_pipeline(config)?;
        let notifier = Notifier::from_config(config)?;

        Ok(Self {
            paginator,
            extractor,
            notifier,
            storage,
            max_pages: config.scraper.max_pages,
            workers: config.scraper.workers as usize,
        })
    }

    /// Overrides the number of result pages scanned per target
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Processes every target and records the run in the ledger
    ///
    /// Targets on a foreign domain are logged and skipped. Only storage
    /// failures abort the run.
    pub async fn run(&mut self, targets: &[String], config_hash: &str) -> Result<RunCounters, RadarError> {
        let run_id = self.storage.create_run(config_hash)?;
        tracing::info!("Starting run {} for {} target(s)", run_id, targets.len());

        let mut totals = RunCounters::default();
        for target in targets {
            tracing::info!("Processing URL: {}", target);
            match self.process_target(target).await {
                Ok(report) => totals.absorb(&report.counters),
                Err(RadarError::InvalidTargetDomain { url, expected }) => {
                    tracing::error!(
                        "Bad URL {}: only {} links can be monitored, skipping",
                        url,
                        expected
                    );
                    totals.invalid_targets += 1;
                }
                Err(e) => {
                    tracing::error!("Run {} aborted on {}: {}", run_id, target, e);
                    self.storage.finish_run(run_id, RunStatus::Failed, &totals)?;
                    return Err(e);
                }
            }
        }

        self.storage
            .finish_run(run_id, RunStatus::Completed, &totals)?;
        tracing::info!(
            "Run {} finished: {} target(s), {} ads found, {} new, {} extracted, {} digest(s) sent",
            run_id,
            totals.targets,
            totals.ads_found,
            totals.new_ads,
            totals.ads_extracted,
            totals.notifications
        );

        Ok(totals)
    }

    /// Runs the full cycle for a single target
    ///
    /// # Errors
    ///
    /// `RadarError::InvalidTargetDomain` for targets outside the monitored
    /// domain, or a storage error. Network trouble only shrinks the results.
    pub async fn process_target(&mut self, target: &str) -> Result<TargetReport, RadarError> {
        let scan = self.paginator.scan(target, self.max_pages).await?;
        let mut counters = RunCounters {
            targets: 1,
            ads_found: scan.links.len() as u32,
            ..RunCounters::default()
        };

        let mut new_urls = Vec::new();
        for url in scan.links {
            if !self.storage.exists(&url)? {
                new_urls.push(url);
            }
        }
        counters.new_ads = new_urls.len() as u32;
        tracing::info!(
            "Found {} new ads (out of {} total) for {}",
            counters.new_ads,
            counters.ads_found,
            target
        );

        if new_urls.is_empty() {
            return Ok(TargetReport {
                target: target.to_string(),
                stop: scan.stop,
                records: Vec::new(),
                delivered: true,
                counters,
            });
        }

        let records = extract_all(&self.extractor, new_urls.clone(), self.workers).await;
        counters.ads_extracted = records.len() as u32;

        let mut delivered = true;
        if records.is_empty() {
            tracing::warn!(
                "Found {} new URLs but couldn't extract data from them",
                new_urls.len()
            );
        } else {
            let digest = build_digest(target, &records);
            match self.notifier.send(&digest).await {
                Ok(()) => {
                    counters.notifications = 1;
                    tracing::info!("Sent digest: {}", digest.subject);
                }
                Err(e) => {
                    delivered = false;
                    tracing::error!("Could not deliver digest for {}: {}", target, e);
                }
            }
        }

        for url in &new_urls {
            self.storage.record(url, target)?;
        }

        tracing::info!("Completed processing for {}", target);
        Ok(TargetReport {
            target: target.to_string(),
            stop: scan.stop,
            records,
            delivered,
            counters,
        })
    }
}
