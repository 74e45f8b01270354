//! Digest formatting
//!
//! Turns the new ads found for one target into a subject line and a plain-text
//! body, in the spirit of a short e-mail.

use crate::crawler::AdRecord;

/// Longest description excerpt shown per ad, in characters
pub const DESCRIPTION_EXCERPT_CHARS: usize = 300;

/// Formatted notification content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    pub subject: String,
    pub body: String,
}

impl Digest {
    /// Subject and body joined the way chat messages show them
    pub fn as_message(&self) -> String {
        format!("{}\n\n{}", self.subject, self.body)
    }
}

/// Builds the digest for the new ads of one target
///
/// # Example
///
/// ```
/// use ad_radar::crawler::AdRecord;
/// use ad_radar::notify::build_digest;
///
/// let ad = AdRecord {
///     title: "City bike".to_string(),
///     price: "650 lei".to_string(),
///     url: "https://www.example.test/d/bike-ID1.html".to_string(),
///     description: "Recently serviced.".to_string(),
///     seller: None,
/// };
/// let digest = build_digest("https://www.example.test/bikes/", &[ad]);
/// assert_eq!(digest.subject, "1 new ad for https://www.example.test/bikes/");
/// ```
pub fn build_digest(target: &str, ads: &[AdRecord]) -> Digest {
    let noun = if ads.len() == 1 { "ad" } else { "ads" };
    let subject = format!("{} new {} for {}", ads.len(), noun, target);

    let mut body = String::new();
    for (index, ad) in ads.iter().enumerate() {
        if index > 0 {
            body.push_str("\n\n");
        }
        body.push_str(&format!("{}. {}\n", index + 1, ad.title));
        body.push_str(&format!("Price: {}\n", ad.price));
        if let Some(seller) = &ad.seller {
            body.push_str(&format!("Seller: {}\n", seller));
        }
        body.push_str(&format!("{}\n", ad.url));
        body.push_str(&excerpt(&ad.description, DESCRIPTION_EXCERPT_CHARS));
    }

    Digest { subject, body }
}

/// Cuts `text` to at most `max_chars` characters, marking the cut with an ellipsis
pub fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
