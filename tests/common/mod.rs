//! Shared fixtures for the wiremock-driven tests

#![allow(dead_code)]

use ad_radar::config::{Config, ScraperConfig, SiteConfig, StorageConfig, TargetsConfig, TelegramConfig};
use ad_radar::crawler::{AdExtractor, Fetcher, ListingPaginator};
use wiremock::MockServer;

pub const CATEGORY_PATH: &str = "/category/phones/";

/// `host:port` of the mock server, used as the monitored domain
pub fn domain_of(server: &MockServer) -> String {
    url::Url::parse(&server.uri())
        .map(|u| format!("{}:{}", u.host_str().unwrap(), u.port().unwrap()))
        .expect("Failed to parse mock server URI")
}

/// Configuration pointing at the mock server, with no pacing delay
pub fn test_config(server: &MockServer, database_path: &str) -> Config {
    Config {
        site: SiteConfig {
            domain: domain_of(server),
            scheme: "http".to_string(),
        },
        scraper: ScraperConfig {
            request_delay_ms: 0,
            request_timeout_secs: 5,
            workers: 4,
            ..ScraperConfig::default()
        },
        storage: StorageConfig {
            database_path: database_path.to_string(),
        },
        targets: TargetsConfig::default(),
        telegram: None,
    }
}

/// Adds a Telegram section whose API lives on the mock server
pub fn with_telegram(mut config: Config, server: &MockServer) -> Config {
    config.telegram = Some(TelegramConfig {
        bot_token: "123:abc".to_string(),
        chat_id: "42".to_string(),
        api_base: server.uri(),
    });
    config
}

pub fn paginator(config: &Config) -> ListingPaginator {
    let fetcher = Fetcher::new(&config.scraper).expect("Failed to build fetcher");
    ListingPaginator::new(fetcher, &config.site.scheme, &config.site.domain)
        .expect("Failed to build paginator")
}

pub fn extractor(config: &Config) -> AdExtractor {
    let fetcher = Fetcher::new(&config.scraper).expect("Failed to build fetcher");
    AdExtractor::new(fetcher, &config.scraper.currency_markers).expect("Failed to build extractor")
}

/// A results page with one listing card per href and an optional pagination list
pub fn listing_page(hrefs: &[&str], last_page: Option<u32>) -> String {
    let cards: String = hrefs
        .iter()
        .map(|href| {
            format!(
                r#"<div class="css-1sw7q4x"><a class="css-rc5s2u" href="{}"><h6>Ad</h6></a></div>"#,
                href
            )
        })
        .collect();

    let pagination = match last_page {
        Some(last) => {
            let items: String = (1..=last)
                .map(|n| format!(r#"<li class="pagination-item"><a>{}</a></li>"#, n))
                .collect();
            format!(r#"<ul class="pagination-list">{}</ul>"#, items)
        }
        None => String::new(),
    };

    format!(
        "<html><head><title>Phones</title></head><body><main>{}</main>{}</body></html>",
        cards, pagination
    )
}

/// An ad page; `price` of `None` leaves the price heading out entirely
pub fn ad_page(title: &str, price: Option<&str>, description: &str, seller: Option<&str>) -> String {
    let price = price
        .map(|p| format!(r#"<h3 class="css-ddweki">{}</h3>"#, p))
        .unwrap_or_default();
    let seller = seller
        .map(|s| format!(r#"<h4 class="css-1lcz6o7">{}</h4>"#, s))
        .unwrap_or_default();

    format!(
        r#"<html><body>
        <h1 class="css-1soizd2">{}</h1>
        {}
        <div class="css-bgzo2k">{}</div>
        {}
        </body></html>"#,
        title, price, description, seller
    )
}
