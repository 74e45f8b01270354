//! Extraction coordinator
//!
//! Runs the ad extractor over many URLs at once. Concurrency is bounded by a
//! semaphore; each task owns its URL and shares nothing mutable with the
//! others, so results are simply collected as tasks finish.

use crate::crawler::extractor::{AdExtractor, AdRecord};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Extracts every URL with at most `workers` extractions in flight
///
/// URLs that yield no record are dropped. The order of the returned records
/// does not follow the input order. Duplicate URLs are extracted twice;
/// dedupe before calling if that matters.
///
/// # Example
///
/// ```no_run
/// use ad_radar::config::ScraperConfig;
/// use ad_radar::crawler::{extract_all, AdExtractor, Fetcher};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ScraperConfig::default();
/// let extractor = AdExtractor::new(Fetcher::new(&config)?, &config.currency_markers)?;
/// let urls = vec!["https://www.olx.ro/d/oferta/bike-ID1.html".to_string()];
/// let records = extract_all(&extractor, urls, 10).await;
/// println!("{} ads extracted", records.len());
/// # Ok(())
/// # }
/// ```
pub async fn extract_all(
    extractor: &AdExtractor,
    urls: Vec<String>,
    workers: usize,
) -> Vec<AdRecord> {
    let total = urls.len();
    let semaphore = Arc::new(Semaphore::new(workers.max(1)));
    let mut tasks = JoinSet::new();

    for url in urls {
        let extractor = extractor.clone();
        let semaphore = Arc::clone(&semaphore);
        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok()?;
            extractor.extract(&url).await
        });
    }

    let mut records = Vec::with_capacity(total);
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(e) => tracing::error!("Extraction task failed: {}", e),
        }
    }

    tracing::info!("Extracted {} of {} ads", records.len(), total);
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::Fetcher;
    use std::time::Duration;

    #[tokio::test]
    async fn test_empty_batch() {
        let fetcher = Fetcher::with_client(reqwest::Client::new(), Duration::ZERO);
        let extractor = AdExtractor::new(fetcher, &["lei".to_string()]).unwrap();

        let records = extract_all(&extractor, Vec::new(), 10).await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_urls_are_dropped() {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(500))
            .build()
            .unwrap();
        let fetcher = Fetcher::with_client(client, Duration::ZERO);
        let extractor = AdExtractor::new(fetcher, &["lei".to_string()]).unwrap();

        let urls = vec![
            "http://127.0.0.1:9/d/ad-1.html".to_string(),
            "http://127.0.0.1:9/d/ad-2.html".to_string(),
        ];
        let records = extract_all(&extractor, urls, 1).await;
        assert!(records.is_empty());
    }
}
