//! Storage module for persisting seen ads and run history
//!
//! This module handles all database operations, including:
//! - SQLite database initialization and schema management
//! - The seen-ads dedup store
//! - The run ledger

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use crate::RadarError;

use std::path::Path;

/// Initializes or opens a storage database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStorage)` - Successfully initialized storage
/// * `Err(RadarError)` - Failed to initialize storage
pub fn open_storage(path: &Path) -> Result<SqliteStorage, RadarError> {
    SqliteStorage::new(path)
}

/// An ad URL that has already been offered for extraction
#[derive(Debug, Clone)]
pub struct SeenAd {
    pub url: String,
    pub target: String,
    pub first_seen_at: String,
}

/// Represents a monitoring run
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub id: i64,
    pub started_at: String,
    pub finished_at: Option<String>,
    pub config_hash: String,
    pub status: RunStatus,
    pub counters: RunCounters,
}

/// What a run did, summed over all targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounters {
    /// Targets scanned successfully
    pub targets: u32,
    /// Targets skipped because they are not on the monitored domain
    pub invalid_targets: u32,
    /// Ad URLs discovered on listing pages
    pub ads_found: u32,
    /// Discovered ad URLs not seen before
    pub new_ads: u32,
    /// New ads whose data was extracted
    pub ads_extracted: u32,
    /// Digests delivered
    pub notifications: u32,
}

impl RunCounters {
    /// Adds another set of counters to this one
    pub fn absorb(&mut self, other: &RunCounters) {
        self.targets += other.targets;
        self.invalid_targets += other.invalid_targets;
        self.ads_found += other.ads_found;
        self.new_ads += other.new_ads;
        self.ads_extracted += other.ads_extracted;
        self.notifications += other.notifications;
    }
}

/// Status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Completed,
    Failed,
}

impl RunStatus {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "running" => Some(Self::Running),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}
