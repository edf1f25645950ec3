//! Local persistence for bookmarks and the display preference.
//!
//! Two JSON files under a per-user state directory: `bookmarks.json` holds the
//! full bookmark list, `dark_mode.json` holds one boolean. Reads happen once
//! at startup and degrade to defaults when a file is missing or does not
//! decode; writes replace the whole file on every mutation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::Paper;

const BOOKMARKS_FILE: &str = "bookmarks.json";
const DARK_MODE_FILE: &str = "dark_mode.json";

/// The set of bookmarked papers, in insertion order.
///
/// Membership is decided by PDF-link equality, the same identity every other
/// part of the app uses. There is no size bound and no deduplication beyond
/// that rule.
#[derive(Debug, Clone, Default)]
pub struct Bookmarks {
    papers: Vec<Paper>,
}

impl Bookmarks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-loaded list, keeping its order
    pub fn from_papers(papers: Vec<Paper>) -> Self {
        Self { papers }
    }

    /// Add the paper if absent, remove it if present.
    ///
    /// Returns whether the paper is bookmarked afterwards. Removal drops
    /// every entry with an equal PDF link, so papers without one (empty
    /// link) toggle as a group.
    pub fn toggle(&mut self, paper: &Paper) -> bool {
        if self.contains(paper) {
            self.papers.retain(|p| !p.is_same(paper));
            false
        } else {
            self.papers.push(paper.clone());
            true
        }
    }

    pub fn contains(&self, paper: &Paper) -> bool {
        self.papers.iter().any(|p| p.is_same(paper))
    }

    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }

    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }
}

/// Durable storage for the bookmark set and the dark-mode flag.
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    /// Store rooted at an explicit directory
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// The per-user default state directory
    pub fn default_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("paperdeck")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read the persisted bookmark list.
    ///
    /// A missing file is the normal first run; anything that does not decode
    /// as a JSON array of papers resets to the empty set with a warning
    /// rather than failing startup.
    pub fn load_bookmarks(&self) -> Bookmarks {
        let path = self.dir.join(BOOKMARKS_FILE);
        match self.read_json_file::<Vec<Paper>>(&path) {
            Ok(papers) => {
                tracing::debug!(count = papers.len(), "loaded bookmarks");
                Bookmarks::from_papers(papers)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Bookmarks::new(),
            Err(e) => {
                tracing::warn!("Ignoring unreadable bookmark file {}: {}", path.display(), e);
                Bookmarks::new()
            }
        }
    }

    /// Write the whole bookmark list, replacing the previous file
    pub fn save_bookmarks(&self, bookmarks: &Bookmarks) -> io::Result<()> {
        self.write_json_file(&self.dir.join(BOOKMARKS_FILE), &bookmarks.papers)
    }

    /// Read the persisted dark-mode flag, defaulting to light
    pub fn load_dark_mode(&self) -> bool {
        let path = self.dir.join(DARK_MODE_FILE);
        match self.read_json_file::<bool>(&path) {
            Ok(dark) => dark,
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable dark-mode file {}: {}",
                    path.display(),
                    e
                );
                false
            }
        }
    }

    pub fn save_dark_mode(&self, dark: bool) -> io::Result<()> {
        self.write_json_file(&self.dir.join(DARK_MODE_FILE), &dark)
    }

    fn read_json_file<T: DeserializeOwned>(&self, path: &Path) -> io::Result<T> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
    }

    fn write_json_file<T: Serialize>(&self, path: &Path, data: &T) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_string_pretty(data)?;
        fs::write(path, content)
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(Self::default_dir())
    }
}
