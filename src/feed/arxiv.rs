//! arXiv Atom feed client and decoder.

use quick_xml::de::from_str;
use serde::Deserialize;

use crate::feed::FeedError;
use crate::models::Paper;

/// Base URL for the arXiv query API
pub const ARXIV_API_URL: &str = "https://export.arxiv.org/api/query";

/// Author names shown before the rest collapse to "et al."
const MAX_AUTHOR_NAMES: usize = 3;

/// Client for the single fetch the app performs at startup.
///
/// One GET, no pagination, no retry, no explicit timeout (the transport's
/// defaults apply). A failed fetch is terminal for the session.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
}

impl FeedClient {
    /// Create a new client
    pub fn new() -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }

    /// Query URL for the newest `max_results` submissions in `category`,
    /// sorted by submission date descending
    pub fn query_url(category: &str, max_results: usize) -> String {
        format!(
            "{}?search_query={}&max_results={}&sortBy=submittedDate&sortOrder=descending",
            ARXIV_API_URL,
            urlencoding::encode(&format!("cat:{}", category)),
            max_results
        )
    }

    /// Fetch and decode the feed for `category`
    pub async fn fetch(&self, category: &str, max_results: usize) -> Result<Vec<Paper>, FeedError> {
        self.fetch_url(&Self::query_url(category, max_results)).await
    }

    /// Fetch and decode the feed at an explicit URL
    pub async fn fetch_url(&self, url: &str) -> Result<Vec<Paper>, FeedError> {
        tracing::debug!(url, "fetching feed");

        let response = self
            .http
            .get(url)
            .header("Accept", "application/atom+xml")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedError::Network("Network response was not ok".to_string()));
        }

        let body = response.text().await?;
        let papers = parse_feed(&body)?;
        tracing::info!(papers = papers.len(), "feed decoded");
        Ok(papers)
    }
}

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    title: Option<String>,
    summary: Option<String>,
    published: Option<String>,
    #[serde(rename = "author", default)]
    authors: Vec<AtomAuthor>,
    #[serde(rename = "link", default)]
    links: Vec<AtomLink>,
}

#[derive(Debug, Deserialize)]
struct AtomAuthor {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@type")]
    media_type: Option<String>,
    #[serde(rename = "@href")]
    href: Option<String>,
}

/// Decode an Atom document into papers.
///
/// Every field of every entry is optional; anything missing degrades to the
/// sentinels on [`Paper`] instead of failing, so one incomplete entry never
/// aborts the load. Only a document that cannot be decoded at all is an
/// error.
pub fn parse_feed(xml: &str) -> Result<Vec<Paper>, FeedError> {
    let feed: AtomFeed =
        from_str(xml).map_err(|e| FeedError::Parse(format!("Failed to parse Atom feed: {}", e)))?;

    Ok(feed.entries.iter().map(paper_from_entry).collect())
}

fn paper_from_entry(entry: &AtomEntry) -> Paper {
    let title = entry
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(Paper::NO_TITLE)
        .to_string();

    let summary = entry
        .summary
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(Paper::NO_ABSTRACT)
        .to_string();

    // Kept raw; display-time formatting deals with it
    let published = entry
        .published
        .clone()
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| Paper::NO_PUBLISH_DATE.to_string());

    // First three author elements contribute their non-empty trimmed names;
    // the marker reflects the element count, not the name count
    let mut authors: Vec<String> = entry
        .authors
        .iter()
        .take(MAX_AUTHOR_NAMES)
        .filter_map(|author| author.name.as_deref())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect();
    if entry.authors.len() > MAX_AUTHOR_NAMES {
        authors.push(Paper::ET_AL.to_string());
    }

    let pdf_link = entry
        .links
        .iter()
        .find(|link| link.media_type.as_deref() == Some("application/pdf"))
        .and_then(|link| link.href.clone())
        .unwrap_or_default();

    Paper {
        title,
        summary,
        published,
        authors,
        pdf_link,
    }
}
