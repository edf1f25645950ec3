//! Navigation over the deck: cursor arithmetic and input translation.
//!
//! Three input modalities (drag-swipe, arrow keys, mouse wheel) feed the same
//! two logical actions. Translation is a pure function so the terminal event
//! plumbing stays out of the navigation logic.

use crate::models::Paper;

/// The only two things any navigation input can mean
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Next,
    Previous,
}

/// A raw gesture from one of the three input modalities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    SwipeUp,
    SwipeDown,
    KeyUp,
    KeyDown,
    WheelUp,
    WheelDown,
}

/// Map a gesture to its navigation action.
///
/// Swiping up, pressing the down arrow and wheeling down all advance to the
/// next card; their mirror gestures go back.
pub fn translate(event: InputEvent) -> NavAction {
    match event {
        InputEvent::SwipeUp | InputEvent::KeyDown | InputEvent::WheelDown => NavAction::Next,
        InputEvent::SwipeDown | InputEvent::KeyUp | InputEvent::WheelUp => NavAction::Previous,
    }
}

/// Next cursor position with wraparound. `len` must be non-zero.
pub fn next_index(cursor: usize, len: usize) -> usize {
    (cursor + 1) % len
}

/// Previous cursor position with wraparound. `len` must be non-zero.
pub fn prev_index(cursor: usize, len: usize) -> usize {
    (cursor + len - 1) % len
}

/// Index of the first paper whose PDF link equals `pdf_link`
pub fn find_by_pdf_link(deck: &[Paper], pdf_link: &str) -> Option<usize> {
    deck.iter().position(|paper| paper.pdf_link == pdf_link)
}
