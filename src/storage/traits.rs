//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::storage::{RunCounters, RunRecord, RunStatus, SeenAd};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Run not found: {0}")]
    RunNotFound(i64),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// The seen-ads half is the dedup store: an ad URL is offered for extraction
/// only while `exists` says false, and `record` is called for every URL that
/// was offered, whether or not extraction or delivery succeeded.
pub trait Storage {
    // ===== Seen Ads =====

    /// Checks whether an ad URL has been processed before
    fn exists(&self, url: &str) -> StorageResult<bool>;

    /// Marks an ad URL as processed
    ///
    /// Recording a URL twice keeps the first sighting.
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute ad URL
    /// * `target` - The listing page it was discovered on
    fn record(&mut self, url: &str, target: &str) -> StorageResult<()>;

    /// Gets a seen ad by URL
    fn get_seen(&self, url: &str) -> StorageResult<Option<SeenAd>>;

    /// Gets total number of seen ads
    fn count_seen(&self) -> StorageResult<u64>;

    /// Gets seen-ad counts per target, largest first
    fn count_seen_by_target(&self) -> StorageResult<Vec<(String, u64)>>;

    // ===== Run Management =====

    /// Creates a new run
    ///
    /// # Arguments
    ///
    /// * `config_hash` - Hash of the configuration file
    ///
    /// # Returns
    ///
    /// The ID of the newly created run
    fn create_run(&mut self, config_hash: &str) -> StorageResult<i64>;

    /// Gets a run by ID
    fn get_run(&self, run_id: i64) -> StorageResult<RunRecord>;

    /// Gets the most recent run
    fn get_latest_run(&self) -> StorageResult<Option<RunRecord>>;

    /// Closes a run with its final status and counters
    fn finish_run(
        &mut self,
        run_id: i64,
        status: RunStatus,
        counters: &RunCounters,
    ) -> StorageResult<()>;

    /// Gets total number of runs
    fn count_runs(&self) -> StorageResult<u64>;
}
