//! # paperdeck
//!
//! A terminal deck of the latest arXiv papers: fetch a category feed, shuffle
//! it, and swipe through one paper at a time with bookmarks and a dark mode
//! that survive restarts.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (Paper, Session)
//! - [`feed`]: arXiv Atom feed client and decoder
//! - [`nav`]: Circular deck navigation and input mapping
//! - [`store`]: Bookmark and display-mode persistence
//! - [`tui`]: Interactive terminal UI
//! - [`config`]: Configuration management

pub mod config;
pub mod feed;
pub mod models;
pub mod nav;
pub mod store;
pub mod tui;

// Re-export commonly used types
pub use feed::{FeedClient, FeedError};
pub use models::{Paper, Session};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
