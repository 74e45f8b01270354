//! Queryable HTML document
//!
//! A thin layer over `scraper::Html` giving the paginator and the extractor
//! the three things they need: CSS selection, attribute access and text
//! extraction in the two shapes the marketplace markup calls for.

use crate::RadarError;
use scraper::{ElementRef, Html, Selector};

/// A parsed HTML page
#[derive(Debug)]
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses a full HTML document; malformed markup is repaired, never rejected
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// All elements matching `selector`, in document order
    pub fn select_all<'a>(&'a self, selector: &'a Selector) -> Vec<ElementRef<'a>> {
        self.html.select(selector).collect()
    }

    /// The first element matching `selector`
    pub fn select_first<'a>(&'a self, selector: &'a Selector) -> Option<ElementRef<'a>> {
        self.html.select(selector).next()
    }
}

/// Compiles a CSS selector, reporting the offending selector on failure
pub fn compile_selector(css: &str) -> Result<Selector, RadarError> {
    Selector::parse(css).map_err(|e| RadarError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

/// First descendant of `element` matching `selector`
pub fn find_within<'a>(element: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    element.select(selector).next()
}

/// Text of an element with every text node trimmed and glued together
///
/// `<h3> 1 200 <span>lei</span></h3>` becomes `"1 200lei"`.
pub fn inline_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect::<String>()
}

/// Text of an element with block structure kept as line breaks
///
/// Each non-empty text node becomes one trimmed line.
pub fn block_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(doc: &Document, css: &str) -> String {
        let selector = compile_selector(css).unwrap();
        inline_text(doc.select_first(&selector).unwrap())
    }

    #[test]
    fn test_inline_text_trims_and_joins() {
        let doc = Document::parse("<h3>  1 200 <span> lei </span></h3>");
        assert_eq!(first(&doc, "h3"), "1 200lei");
    }

    #[test]
    fn test_block_text_keeps_lines() {
        let doc = Document::parse(
            "<div class=\"d\"><p>Phone in good shape.</p>\n<br><p>  Charger included. </p></div>",
        );
        let selector = compile_selector("div.d").unwrap();
        let text = block_text(doc.select_first(&selector).unwrap());
        assert_eq!(text, "Phone in good shape.\nCharger included.");
    }

    #[test]
    fn test_select_all_in_document_order() {
        let doc = Document::parse("<ul><li>1</li><li>2</li><li>3</li></ul>");
        let selector = compile_selector("li").unwrap();
        let items: Vec<String> = doc
            .select_all(&selector)
            .into_iter()
            .map(inline_text)
            .collect();
        assert_eq!(items, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_find_within_scopes_to_element() {
        let doc = Document::parse(
            "<div class=\"c\"><span>no link</span></div><a href=\"/outside\">x</a>",
        );
        let container = compile_selector("div.c").unwrap();
        let anchor = compile_selector("a").unwrap();
        let element = doc.select_first(&container).unwrap();
        assert!(find_within(element, &anchor).is_none());
    }

    #[test]
    fn test_invalid_selector_is_reported() {
        let err = compile_selector("div[").unwrap_err();
        assert!(matches!(err, RadarError::Selector { .. }));
    }
}
