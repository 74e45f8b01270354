use crate::UrlError;
use url::Url;

/// Returns the network location (`host` or `host:port`) of a link
///
/// The host is lowercased and a default port is omitted. Links without a host,
/// including anything that only parses relative to a base, yield `None`.
/// Protocol-relative links (`//host/path`) report their host.
///
/// # Examples
///
/// ```
/// use ad_radar::url::netloc;
///
/// assert_eq!(netloc("https://WWW.Example.test/d/1"), Some("www.example.test".to_string()));
/// assert_eq!(netloc("http://127.0.0.1:8080/"), Some("127.0.0.1:8080".to_string()));
/// assert_eq!(netloc("/d/1"), None);
/// ```
pub fn netloc(link: &str) -> Option<String> {
    let parsed = match Url::parse(link) {
        Ok(url) => url,
        Err(::url::ParseError::RelativeUrlWithoutBase) if link.starts_with("//") => {
            Url::parse(&format!("http:{}", link)).ok()?
        }
        Err(_) => return None,
    };

    let host = parsed.host_str().filter(|h| !h.is_empty())?.to_lowercase();
    match parsed.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

/// Normalizes a target listing URL before pagination
///
/// Drops the query string (pagination adds its own) and any trailing slash,
/// so `https://site/category/phones/?sort=new` becomes
/// `https://site/category/phones`.
pub fn normalize_target(target: &str) -> String {
    let without_query = target.split_once('?').map_or(target, |(head, _)| head);
    without_query.trim_end_matches('/').to_string()
}

/// Builds the URL of one result page of a normalized target
///
/// # Examples
///
/// ```
/// use ad_radar::url::page_url;
///
/// assert_eq!(
///     page_url("https://www.example.test/category/phones", 2),
///     "https://www.example.test/category/phones/?page=2"
/// );
/// ```
pub fn page_url(base: &str, page: u32) -> String {
    format!("{}/?page={}", base, page)
}

/// Resolves an ad link against the configured scheme and domain
///
/// Returns the canonical absolute link (lowercased host, no fragment) whose
/// network location is `domain`; anything that resolves elsewhere or to a
/// non-HTTP scheme is rejected. Absolute links come back in canonical form.
///
/// # Examples
///
/// ```
/// use ad_radar::url::resolve_ad_url;
///
/// let resolved = resolve_ad_url("/d/ad-123", "https", "www.example.test").unwrap();
/// assert_eq!(resolved, "https://www.example.test/d/ad-123");
/// ```
pub fn resolve_ad_url(href: &str, scheme: &str, domain: &str) -> Result<String, UrlError> {
    let base = Url::parse(&format!("{}://{}/", scheme, domain))
        .map_err(|e| UrlError::Parse(format!("{}://{}: {}", scheme, domain, e)))?;

    let mut resolved = base
        .join(href.trim())
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))?;

    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return Err(UrlError::InvalidScheme(resolved.scheme().to_string()));
    }
    resolved.set_fragment(None);

    let resolved = resolved.to_string();
    match netloc(&resolved) {
        Some(found) if found.eq_ignore_ascii_case(domain) => Ok(resolved),
        _ => Err(UrlError::MissingDomain(resolved)),
    }
}
