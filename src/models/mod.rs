//! Core data models: the paper record and the per-run session state.

mod paper;
mod session;

pub use paper::Paper;
pub use session::Session;
