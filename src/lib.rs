//! Ad-Radar: a classified-ads listing monitor
//!
//! This crate watches listing pages on a single marketplace domain, discovers
//! newly posted ads across the first few result pages, extracts structured data
//! from each new ad and hands a digest to a notification channel.

pub mod config;
pub mod crawler;
pub mod monitor;
pub mod notify;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Ad-Radar operations
#[derive(Debug, Error)]
pub enum RadarError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Bad URL {url}: only {expected} links can be monitored")]
    InvalidTargetDomain { url: String, expected: String },

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Notification error: {0}")]
    Notify(#[from] notify::NotifyError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain: {0}")]
    InvalidDomain(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL: {0}")]
    MissingDomain(String),
}

/// Result type alias for Ad-Radar operations
pub type Result<T> = std::result::Result<T, RadarError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{AdExtractor, AdRecord, Fetcher, ListingPaginator, ScanReport, StopReason};
pub use state::PageState;
pub use crate::url::{is_internal, is_relative, is_relevant};
