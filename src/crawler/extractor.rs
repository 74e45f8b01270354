//! Ad page extractor
//!
//! Turns one ad URL into an `AdRecord`. Title, price and description are
//! mandatory; seller is best effort. A page missing any mandatory field yields
//! no record at all rather than a partial one.

use crate::crawler::document::Document;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::selectors::AdSelectors;
use crate::RadarError;
use std::sync::Arc;

/// Structured data of one ad
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdRecord {
    pub title: String,
    pub price: String,
    pub url: String,
    pub description: String,
    pub seller: Option<String>,
}

/// Fetches ad pages and runs the field chains over them
///
/// Cheap to clone; clones share the compiled selector tables.
#[derive(Debug, Clone)]
pub struct AdExtractor {
    fetcher: Fetcher,
    selectors: Arc<AdSelectors>,
}

impl AdExtractor {
    /// Creates an extractor whose price chain accepts `currency_markers`
    pub fn new(fetcher: Fetcher, currency_markers: &[String]) -> Result<Self, RadarError> {
        Ok(Self {
            fetcher,
            selectors: Arc::new(AdSelectors::new(currency_markers)?),
        })
    }

    /// Fetches `ad_url` and extracts its record
    ///
    /// Returns `None` when the page cannot be fetched or lacks a mandatory field.
    pub async fn extract(&self, ad_url: &str) -> Option<AdRecord> {
        tracing::debug!("Processing {}", ad_url);

        let body = match self.fetcher.fetch_html(ad_url).await {
            Ok(body) => body,
            Err(failure) => {
                tracing::warn!("Could not fetch ad page: {}", failure);
                return None;
            }
        };

        self.parse_ad(&body, ad_url)
    }

    /// Extracts a record from an already fetched ad page
    pub fn parse_ad(&self, body: &str, ad_url: &str) -> Option<AdRecord> {
        let document = Document::parse(body);

        let title = self.selectors.title.resolve(&document);
        let price = self.selectors.price.resolve(&document);
        let description = self.selectors.description.resolve(&document);
        let seller = self.selectors.seller.resolve(&document);

        match (title, price, description) {
            (Some(title), Some(price), Some(description)) => Some(AdRecord {
                title,
                price,
                url: ad_url.to_string(),
                description,
                seller,
            }),
            (title, price, description) => {
                tracing::warn!(
                    "Missing data for {}: title={}, price={}, description={}",
                    ad_url,
                    title.is_some(),
                    price.is_some(),
                    description.is_some()
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const URL: &str = "https://www.example.test/d/oferta/iphone-13-ID1.html";

    fn extractor() -> AdExtractor {
        let fetcher = Fetcher::with_client(reqwest::Client::new(), Duration::ZERO);
        let markers = vec!["lei".to_string(), "€".to_string()];
        AdExtractor::new(fetcher, &markers).unwrap()
    }

    fn ad_page(price: &str, description: &str) -> String {
        format!(
            r#"<html><body>
            <h1 class="css-1soizd2">iPhone 13, 128GB</h1>
            <h3 class="css-ddweki">{}</h3>
            <div class="css-bgzo2k">{}</div>
            <h4 class="css-1lcz6o7">Maria</h4>
            </body></html>"#,
            price, description
        )
    }

    #[test]
    fn test_complete_ad() {
        let record = extractor()
            .parse_ad(&ad_page("2 300 lei", "<p>Battery 91%.</p><p>Box included.</p>"), URL)
            .unwrap();

        assert_eq!(record.title, "iPhone 13, 128GB");
        assert_eq!(record.price, "2 300 lei");
        assert_eq!(record.description, "Battery 91%.\nBox included.");
        assert_eq!(record.seller.as_deref(), Some("Maria"));
        assert_eq!(record.url, URL);
    }

    #[test]
    fn test_missing_price_yields_none() {
        assert!(extractor()
            .parse_ad(&ad_page("Negotiable", "Battery 91%, box included."), URL)
            .is_none());
    }

    #[test]
    fn test_nine_char_description_yields_none() {
        assert!(extractor()
            .parse_ad(&ad_page("2 300 lei", "123456789"), URL)
            .is_none());
    }

    #[test]
    fn test_ten_char_description_is_accepted() {
        assert!(extractor()
            .parse_ad(&ad_page("2 300 lei", "1234567890"), URL)
            .is_some());
    }

    #[test]
    fn test_seller_does_not_gate_acceptance() {
        let body = r#"<h1>Bike</h1>
            <p data-testid="ad-price">150 €</p>
            <div data-cy="ad_description">City bike, recently serviced.</div>"#;
        let record = extractor().parse_ad(body, URL).unwrap();

        assert_eq!(record.title, "Bike");
        assert_eq!(record.price, "150 €");
        assert_eq!(record.seller, None);
    }

    #[test]
    fn test_missing_title_yields_none() {
        let body = r#"<h3>150 lei</h3><div class="css-bgzo2k">City bike, recently serviced.</div>"#;
        assert!(extractor().parse_ad(body, URL).is_none());
    }
}
