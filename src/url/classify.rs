//! Link classification predicates
//!
//! All three predicates are total: any string, however malformed, gets an answer.

use crate::url::netloc;
use once_cell::sync::Lazy;
use regex::Regex;

/// Rooted paths such as `/d/oferta/phone-ID1.html`
static ROOTED_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/[\w.\-/]+").expect("rooted path pattern is valid"));

/// Checks whether a link is relative
///
/// A link is relative when it has no network location, or when it starts with
/// a rooted path. The second rule also catches inputs the parser would read
/// differently, such as protocol-relative `//host/path` links.
///
/// # Examples
///
/// ```
/// use ad_radar::url::is_relative;
///
/// assert!(is_relative("/d/ad-123"));
/// assert!(!is_relative("https://www.example.test/d/ad-123"));
/// ```
pub fn is_relative(url: &str) -> bool {
    if netloc(url).is_none() {
        return true;
    }
    ROOTED_PATH.is_match(url)
}

/// Checks whether a link points into `domain`
///
/// Relative links are always internal; absolute links must carry exactly the
/// configured network location.
pub fn is_internal(url: &str, domain: &str) -> bool {
    if is_relative(url) {
        return true;
    }
    netloc(url).is_some_and(|found| found.eq_ignore_ascii_case(domain))
}

/// Checks whether a link is a real listing rather than filler
///
/// The marketplace pads thin result pages with ads from outside the searched
/// region and tags their links with a query string (for example
/// `?reason=extended-region`). Only links with an empty query are relevant.
pub fn is_relevant(url: &str) -> bool {
    query_component(url).is_empty()
}

/// Returns the query component of a link, without the `?` and any fragment
fn query_component(url: &str) -> &str {
    let without_fragment = url.split_once('#').map_or(url, |(head, _)| head);
    without_fragment
        .split_once('?')
        .map_or("", |(_, query)| query)
}
