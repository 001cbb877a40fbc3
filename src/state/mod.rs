//! State module for tracking harvest progress
//!
//! # Components
//!
//! - `PageOutcome`: What happened to a single source page (extracted, exhausted, failed)
//! - `PageReport`: A page outcome tagged with its index and URL

mod page_outcome;

// Re-export main types
pub use page_outcome::{PageOutcome, PageReport};
