use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use ad_radar::config::load_config;
///
/// let config = load_config(Path::new("ad-radar.toml")).unwrap();
/// println!("Scanning {} pages per target", config.scraper.max_pages);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Stored with every run so the ledger shows which configuration produced it.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

/// Reads the list of target URLs from a text file
///
/// One URL per line; blank lines and lines starting with `#` are ignored.
/// A missing file is created empty so the user knows where to put targets.
pub fn load_target_urls(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            std::fs::write(path, "")?;
            tracing::info!(
                "The file '{}' has been created. Add at least one URL to monitor for new ads, one URL per line.",
                path.display()
            );
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let targets: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    if targets.is_empty() {
        tracing::info!(
            "No targets in '{}'. Add at least one URL to monitor for new ads, one URL per line.",
            path.display()
        );
    }

    Ok(targets)
}

/// Collects every target from the config: inline URLs first, then the targets file
pub fn collect_targets(config: &Config) -> Result<Vec<String>, ConfigError> {
    let mut targets = config.targets.urls.clone();
    if let Some(file) = &config.targets.file {
        for target in load_target_urls(Path::new(file))? {
            if !targets.contains(&target) {
                targets.push(target);
            }
        }
    }
    Ok(targets)
}
