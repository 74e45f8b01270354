//! URL handling module for Ad-Radar
//!
//! This module decides which discovered links are real ads on the monitored
//! marketplace and turns them into absolute ad URLs. A link is a usable ad
//! candidate only when it is internal and relevant, checked in that order.

mod classify;
mod normalize;

// Re-export main functions
pub use classify::{is_internal, is_relative, is_relevant};
pub use normalize::{netloc, normalize_target, page_url, resolve_ad_url};

/// Why a discovered link was or was not accepted as an ad candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkVerdict {
    /// Absolute ad URL ready for extraction
    Accepted(String),
    /// Points at a different host
    NotInternal,
    /// Carries a query string marking a filler ad
    NotRelevant,
    /// Looked internal but did not resolve to an ad URL on the domain
    Unresolvable,
}

/// Classifies an `href` found on a listing page
///
/// Accepted links are canonical: lowercased host and no fragment, so two
/// spellings of one ad yield the same URL.
///
/// # Arguments
///
/// * `href` - The raw attribute value
/// * `scheme` - Scheme used to absolutize relative links
/// * `domain` - Network location of the monitored marketplace
///
/// # Examples
///
/// ```
/// use ad_radar::url::{classify_link, LinkVerdict};
///
/// assert_eq!(
///     classify_link("/d/ad-123", "https", "www.example.test"),
///     LinkVerdict::Accepted("https://www.example.test/d/ad-123".to_string())
/// );
/// assert_eq!(
///     classify_link("/d/ad-9?reason=extended-region", "https", "www.example.test"),
///     LinkVerdict::NotRelevant
/// );
/// ```
pub fn classify_link(href: &str, scheme: &str, domain: &str) -> LinkVerdict {
    if !is_internal(href, domain) {
        return LinkVerdict::NotInternal;
    }

    if !is_relevant(href) {
        return LinkVerdict::NotRelevant;
    }

    match resolve_ad_url(href, scheme, domain) {
        Ok(absolute) => LinkVerdict::Accepted(absolute),
        Err(e) => {
            tracing::debug!("Could not resolve {}: {}", href, e);
            LinkVerdict::Unresolvable
        }
    }
}
