//! Page outcome definitions for tracking harvest progress
//!
//! A failed page is represented as a value handed back to the pagination
//! driver rather than an error it has to catch.

use crate::crawler::ExtractionGap;
use crate::FetchError;
use std::fmt;
use url::Url;

/// What happened to one source page
#[derive(Debug)]
pub enum PageOutcome {
    /// Page was fetched and contained result containers
    Extracted {
        /// Records appended to the category's collection
        records: usize,
        /// Containers skipped for missing fields
        gaps: Vec<ExtractionGap>,
    },

    /// Page was fetched but had no result containers
    Exhausted,

    /// Page could not be fetched; contributes no records
    Failed { error: FetchError },
}

impl PageOutcome {
    /// Returns true if the page was fetched
    pub fn is_success(&self) -> bool {
        !self.is_error()
    }

    /// Returns true if the fetch failed
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Number of records this page contributed
    pub fn records(&self) -> usize {
        match self {
            Self::Extracted { records, .. } => *records,
            Self::Exhausted | Self::Failed { .. } => 0,
        }
    }

    /// Containers on this page that were skipped
    pub fn gaps(&self) -> &[ExtractionGap] {
        match self {
            Self::Extracted { gaps, .. } => gaps,
            Self::Exhausted | Self::Failed { .. } => &[],
        }
    }

    /// Short label used in logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Extracted { .. } => "extracted",
            Self::Exhausted => "exhausted",
            Self::Failed { .. } => "failed",
        }
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extracted { records, gaps } => write!(
                f,
                "{} ({} records, {} skipped)",
                self.label(),
                records,
                gaps.len()
            ),
            Self::Exhausted => write!(f, "{}", self.label()),
            Self::Failed { error } => write!(f, "{} ({})", self.label(), error),
        }
    }
}

/// Outcome of one source page of one category
#[derive(Debug)]
pub struct PageReport {
    /// 1-based source page index
    pub page: u32,

    /// The URL that was requested
    pub url: Url,

    pub outcome: PageOutcome,
}
