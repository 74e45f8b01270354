use crate::config::types::{Config, ScraperConfig, SiteConfig, StorageConfig, TelegramConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_scraper_config(&config.scraper)?;
    validate_storage_config(&config.storage)?;
    if let Some(telegram) = &config.telegram {
        validate_telegram_config(telegram)?;
    }
    Ok(())
}

/// Validates the monitored site
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    if config.scheme != "http" && config.scheme != "https" {
        return Err(ConfigError::Validation(format!(
            "scheme must be 'http' or 'https', got '{}'",
            config.scheme
        )));
    }

    validate_netloc(&config.domain)?;

    // Discovered links never carry the scheme's default port, so a domain
    // that names it would match no target.
    let default_port = if config.scheme == "https" { "443" } else { "80" };
    if config.domain.rsplit_once(':').map(|(_, port)| port) == Some(default_port) {
        return Err(ConfigError::InvalidDomain(format!(
            "'{}' names the default {} port; drop ':{}'",
            config.domain, config.scheme, default_port
        )));
    }

    Ok(())
}

/// Validates scraper configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.workers < 1 || config.workers > 100 {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and 100, got {}",
            config.workers
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.currency_markers.iter().any(|m| m.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "currency_markers cannot contain empty entries".to_string(),
        ));
    }

    if config.currency_markers.is_empty() {
        return Err(ConfigError::Validation(
            "currency_markers must list at least one marker".to_string(),
        ));
    }

    Ok(())
}

/// Validates storage configuration
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates Telegram delivery settings
fn validate_telegram_config(config: &TelegramConfig) -> Result<(), ConfigError> {
    if config.bot_token.trim().is_empty() {
        return Err(ConfigError::Validation(
            "telegram bot_token cannot be empty".to_string(),
        ));
    }

    if config.chat_id.trim().is_empty() {
        return Err(ConfigError::Validation(
            "telegram chat_id cannot be empty".to_string(),
        ));
    }

    Url::parse(&config.api_base)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid telegram api_base: {}", e)))?;

    Ok(())
}

/// Validates a network location: a domain with an optional `:port` suffix
fn validate_netloc(netloc: &str) -> Result<(), ConfigError> {
    let (host, port) = match netloc.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (netloc, None),
    };

    if let Some(port) = port {
        if port.parse::<u16>().is_err() {
            return Err(ConfigError::InvalidDomain(format!(
                "Port '{}' in '{}' is not a valid port number",
                port, netloc
            )));
        }
    }

    validate_domain_string(host)
}

/// Validates a domain string (no scheme, no port)
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidDomain(
            "Domain cannot be empty".to_string(),
        ));
    }

    // Check for invalid characters
    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    // Must contain at least one dot (e.g., www.example.com, not just "example")
    if !domain.contains('.') {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' must contain at least one dot (e.g., 'www.example.com')",
            domain
        )));
    }

    Ok(())
}
