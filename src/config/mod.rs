//! Configuration module for Ad-Radar
//!
//! This module handles loading, parsing, and validating TOML configuration files,
//! and reading the list of monitored target URLs.
//!
//! # Example
//!
//! ```no_run
//! use ad_radar::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("ad-radar.toml")).unwrap();
//! println!("Monitoring {}", config.site.domain);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, ScraperConfig, SiteConfig, StorageConfig, TargetsConfig, TelegramConfig,
    DEFAULT_MAX_PAGES, DEFAULT_TELEGRAM_API, DEFAULT_WORKERS,
};

// Re-export parser functions
pub use parser::{
    collect_targets, compute_config_hash, load_config, load_config_with_hash, load_target_urls,
};
