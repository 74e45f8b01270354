//! State module for tracking scan progress
//!
//! # Components
//!
//! - `PageState`: current page, advertised last page and collected ad URLs of one listing scan

mod page_state;

// Re-export main types
pub use page_state::PageState;
