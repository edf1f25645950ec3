//! Feed retrieval and decoding.

mod arxiv;

pub use arxiv::{parse_feed, FeedClient, ARXIV_API_URL};

use rand::seq::SliceRandom;
use thiserror::Error;

use crate::models::Paper;

/// Errors from fetching or decoding the feed.
///
/// Both variants are terminal for the session: the caller shows an error
/// state with the reason text and does not retry.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Transport failure or a non-success HTTP status
    #[error("Network error: {0}")]
    Network(String),

    /// The response body could not be decoded as an Atom document
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        FeedError::Network(err.to_string())
    }
}

/// Shuffle the deck in place with a uniform random permutation
/// (Fisher-Yates via [`SliceRandom`]).
pub fn shuffle(papers: &mut [Paper]) {
    papers.shuffle(&mut rand::thread_rng());
}
