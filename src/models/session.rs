//! Session state for a loaded deck of papers.

use crate::models::Paper;
use crate::nav::{self, NavAction};

/// In-memory state for one run: the shuffled deck and the cursor.
///
/// The deck is fixed once constructed; the cursor moves only through
/// [`Session::apply`] and [`Session::jump_to_link`] and is never persisted.
#[derive(Debug)]
pub struct Session {
    deck: Vec<Paper>,
    cursor: usize,
}

impl Session {
    /// Wrap a freshly fetched deck, cursor at the first card
    pub fn new(deck: Vec<Paper>) -> Self {
        Self { deck, cursor: 0 }
    }

    pub fn deck(&self) -> &[Paper] {
        &self.deck
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The paper under the cursor, `None` only for an empty deck
    pub fn current(&self) -> Option<&Paper> {
        self.deck.get(self.cursor)
    }

    /// Move the cursor one step with wraparound. No-op on an empty deck.
    pub fn apply(&mut self, action: NavAction) {
        if self.deck.is_empty() {
            return;
        }
        self.cursor = match action {
            NavAction::Next => nav::next_index(self.cursor, self.deck.len()),
            NavAction::Previous => nav::prev_index(self.cursor, self.deck.len()),
        };
    }

    /// Jump to the first paper with the given PDF link.
    ///
    /// Returns whether a match was found; on a miss the cursor stays put.
    pub fn jump_to_link(&mut self, pdf_link: &str) -> bool {
        match nav::find_by_pdf_link(&self.deck, pdf_link) {
            Some(index) => {
                self.cursor = index;
                true
            }
            None => false,
        }
    }
}
