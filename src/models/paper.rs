//! Paper model for entries decoded from the arXiv feed.

use serde::{Deserialize, Serialize};

/// One paper from the feed, normalized for display and persistence.
///
/// Fields that are missing from the feed entry carry the sentinel values
/// below instead of being optional, so every card renders the same way and
/// the bookmark file keeps a fixed shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paper {
    /// Paper title
    pub title: String,

    /// Abstract text
    pub summary: String,

    /// Publication timestamp as supplied by the feed, not reparsed until
    /// display time
    pub published: String,

    /// Up to three display names in document order; a trailing "et al."
    /// marker when the entry listed more contributors
    pub authors: Vec<String>,

    /// Direct PDF URL, empty when the entry had no matching link
    pub pdf_link: String,
}

impl Paper {
    /// Sentinel title for entries without one
    pub const NO_TITLE: &'static str = "No title";
    /// Sentinel abstract
    pub const NO_ABSTRACT: &'static str = "No abstract";
    /// Sentinel publication date
    pub const NO_PUBLISH_DATE: &'static str = "No publish date";
    /// Marker appended after the third author name
    pub const ET_AL: &'static str = "et al.";

    /// Two papers are the same paper iff their PDF links are equal.
    ///
    /// This holds even when both links are empty, so entries without a PDF
    /// are indistinguishable to bookmarks and jumps.
    pub fn is_same(&self, other: &Paper) -> bool {
        self.pdf_link == other.pdf_link
    }

    /// Author names joined for a single display line
    pub fn author_line(&self) -> String {
        self.authors.join(", ")
    }

    /// Publication date formatted for display.
    ///
    /// Attempts an RFC 3339 parse and falls back to the raw feed string,
    /// which also covers the sentinel.
    pub fn display_date(&self) -> String {
        match chrono::DateTime::parse_from_rfc3339(&self.published) {
            Ok(date) => date.format("%-d %b %Y").to_string(),
            Err(_) => self.published.clone(),
        }
    }

    /// Whether the paper carries a PDF link worth opening
    pub fn has_pdf(&self) -> bool {
        !self.pdf_link.is_empty()
    }
}
