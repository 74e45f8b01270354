use serde::Deserialize;

/// Default number of result pages scanned per target
pub const DEFAULT_MAX_PAGES: u32 = 2;

/// Default width of the extraction worker pool
pub const DEFAULT_WORKERS: u32 = 10;

/// Default Telegram Bot API endpoint
pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";

/// Main configuration structure for Ad-Radar
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub scraper: ScraperConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub targets: TargetsConfig,
    #[serde(default)]
    pub telegram: Option<TelegramConfig>,
}

/// The marketplace being monitored
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Network location of the marketplace (host, optionally with a port)
    pub domain: String,

    /// Scheme used when resolving relative ad links
    #[serde(default = "default_scheme")]
    pub scheme: String,
}

/// Scraper behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Number of result pages scanned per target
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,

    /// Maximum number of ad pages extracted concurrently
    #[serde(default = "default_workers")]
    pub workers: u32,

    /// Pause before every request (milliseconds)
    #[serde(rename = "request-delay-ms", default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Overrides the built-in browser user agent
    #[serde(rename = "user-agent", default)]
    pub user_agent: Option<String>,

    /// Tokens that mark a text as a price
    #[serde(rename = "currency-markers", default = "default_currency_markers")]
    pub currency_markers: Vec<String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            workers: default_workers(),
            request_delay_ms: default_request_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: None,
            currency_markers: default_currency_markers(),
        }
    }
}

/// Seen-ads store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}

/// Where the monitored listing pages come from
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TargetsConfig {
    /// Text file with one target URL per line
    #[serde(default)]
    pub file: Option<String>,

    /// Targets listed inline
    #[serde(default)]
    pub urls: Vec<String>,
}

/// Telegram delivery settings
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    #[serde(rename = "bot-token")]
    pub bot_token: String,

    #[serde(rename = "chat-id")]
    pub chat_id: String,

    /// Bot API base URL
    #[serde(rename = "api-base", default = "default_telegram_api")]
    pub api_base: String,
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_max_pages() -> u32 {
    DEFAULT_MAX_PAGES
}

fn default_workers() -> u32 {
    DEFAULT_WORKERS
}

fn default_request_delay_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_currency_markers() -> Vec<String> {
    ["lei", "ron", "€", "$"].iter().map(|s| s.to_string()).collect()
}

fn default_telegram_api() -> String {
    DEFAULT_TELEGRAM_API.to_string()
}
