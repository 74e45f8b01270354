//! Selector tables for listing and ad pages
//!
//! Every ad field is described by an ordered chain of candidates. Each candidate
//! pairs a CSS locator with an acceptance rule; the first candidate whose text
//! passes its rule wins. Markup drift is handled by editing these tables.

use crate::crawler::document::{block_text, compile_selector, inline_text, Document};
use crate::RadarError;
use scraper::Selector;

/// Wrapper element of one ad summary on a results page
pub const LISTING_CONTAINER: &str = "div.css-1sw7q4x";

/// Ad link inside a listing container
pub const LISTING_ANCHOR: &str = "a.css-rc5s2u";

/// Any link, used when the classed anchor has disappeared
pub const ANY_ANCHOR: &str = "a";

/// Numbered entries of the results pagination list
pub const PAGINATION_ITEM: &str = "ul.pagination-list li.pagination-item";

pub const TITLE_CANDIDATES: &[&str] = &["h1.css-1soizd2", "h1", "h1[data-cy=\"ad_title\"]"];

pub const PRICE_CANDIDATES: &[&str] = &[
    "h3.css-ddweki",
    "h3",
    "p[data-testid=\"ad-price\"]",
    "span[data-testid=\"ad-price\"]",
];

pub const DESCRIPTION_CANDIDATES: &[&str] = &[
    "div.css-bgzo2k",
    "div[data-cy=\"ad_description\"]",
    "div.css-1g5z7m2",
];

pub const SELLER: &str = "h4.css-1lcz6o7";

/// Shortest description accepted, in characters
pub const MIN_DESCRIPTION_CHARS: usize = 10;

/// How the text of a matched element is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextShape {
    /// Trimmed text nodes glued together
    Inline,
    /// Trimmed text nodes, one per line
    Block,
}

/// Rule a candidate's text must satisfy to be accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acceptance {
    /// Any non-empty text
    NonEmpty,
    /// Text containing one of the markers, compared case-insensitively
    CurrencyMarker(Vec<String>),
    /// Text at least this many characters long
    MinChars(usize),
}

impl Acceptance {
    /// Checks `text` against the rule
    pub fn accepts(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        match self {
            Self::NonEmpty => true,
            Self::CurrencyMarker(markers) => {
                let lowered = text.to_lowercase();
                markers
                    .iter()
                    .any(|marker| lowered.contains(&marker.to_lowercase()))
            }
            Self::MinChars(min) => text.chars().count() >= *min,
        }
    }
}

/// One entry of a field chain
#[derive(Debug, Clone)]
pub struct Candidate {
    pub css: String,
    selector: Selector,
    pub shape: TextShape,
    pub acceptance: Acceptance,
}

impl Candidate {
    pub fn new(css: &str, shape: TextShape, acceptance: Acceptance) -> Result<Self, RadarError> {
        Ok(Self {
            css: css.to_string(),
            selector: compile_selector(css)?,
            shape,
            acceptance,
        })
    }

    /// Text of the first matching element if it passes the acceptance rule
    pub fn evaluate(&self, document: &Document) -> Option<String> {
        let element = document.select_first(&self.selector)?;
        let text = match self.shape {
            TextShape::Inline => inline_text(element),
            TextShape::Block => block_text(element),
        };
        self.acceptance.accepts(&text).then_some(text)
    }
}

/// Ordered fallback chain for one ad field
#[derive(Debug, Clone)]
pub struct FieldChain {
    pub field: &'static str,
    pub candidates: Vec<Candidate>,
}

impl FieldChain {
    /// Builds a chain where every locator shares the same shape and rule
    pub fn uniform(
        field: &'static str,
        locators: &[&str],
        shape: TextShape,
        acceptance: Acceptance,
    ) -> Result<Self, RadarError> {
        let candidates = locators
            .iter()
            .map(|css| Candidate::new(css, shape, acceptance.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { field, candidates })
    }

    /// Evaluates candidates in order and returns the first accepted text
    pub fn resolve(&self, document: &Document) -> Option<String> {
        for candidate in &self.candidates {
            if let Some(text) = candidate.evaluate(document) {
                return Some(text);
            }
            tracing::trace!("{}: candidate '{}' rejected", self.field, candidate.css);
        }
        None
    }
}

/// Compiled selectors used on results pages
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    pub container: Selector,
    pub anchor: Selector,
    pub any_anchor: Selector,
    pub pagination_item: Selector,
}

impl ListingSelectors {
    pub fn new() -> Result<Self, RadarError> {
        Ok(Self {
            container: compile_selector(LISTING_CONTAINER)?,
            anchor: compile_selector(LISTING_ANCHOR)?,
            any_anchor: compile_selector(ANY_ANCHOR)?,
            pagination_item: compile_selector(PAGINATION_ITEM)?,
        })
    }
}

/// Compiled field chains used on ad pages
#[derive(Debug, Clone)]
pub struct AdSelectors {
    pub title: FieldChain,
    pub price: FieldChain,
    pub description: FieldChain,
    pub seller: FieldChain,
}

impl AdSelectors {
    /// Builds the standard chains; `currency_markers` gate the price field
    pub fn new(currency_markers: &[String]) -> Result<Self, RadarError> {
        Ok(Self {
            title: FieldChain::uniform(
                "title",
                TITLE_CANDIDATES,
                TextShape::Inline,
                Acceptance::NonEmpty,
            )?,
            price: FieldChain::uniform(
                "price",
                PRICE_CANDIDATES,
                TextShape::Inline,
                Acceptance::CurrencyMarker(currency_markers.to_vec()),
            )?,
            description: FieldChain::uniform(
                "description",
                DESCRIPTION_CANDIDATES,
                TextShape::Block,
                Acceptance::MinChars(MIN_DESCRIPTION_CHARS),
            )?,
            seller: FieldChain::uniform(
                "seller",
                &[SELLER],
                TextShape::Inline,
                Acceptance::NonEmpty,
            )?,
        })
    }
}
