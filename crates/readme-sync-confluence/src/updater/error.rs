//! Error types for sync runs.

use std::fmt;
use std::path::PathBuf;

use crate::error::ConfluenceError;
use crate::splice::SpliceError;

/// Step of a sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Fetching and validating the current page.
    Fetch,
    /// Reading the markdown file.
    Read,
    /// Converting markdown to storage format.
    Transform,
    /// Placing the converted content between the markers.
    Splice,
    /// Submitting the new body.
    Update,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fetch => "fetch",
            Self::Read => "read",
            Self::Transform => "transform",
            Self::Splice => "splice",
            Self::Update => "update",
        })
    }
}

/// Error during a sync run. Every variant aborts the run before any write
/// that has not already happened.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The page could not be fetched, or the response lacked a required field.
    #[error("fetch failed: {0}")]
    Fetch(#[source] ConfluenceError),

    /// The markdown file could not be read.
    #[error("read failed: {}: {source}", path.display())]
    Read {
        /// Markdown file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The managed region could not be located in the page body.
    #[error("splice failed: {0}")]
    Splice(#[from] SpliceError),

    /// Confluence rejected the update.
    #[error("update failed: {0}")]
    Update(#[source] ConfluenceError),
}

impl SyncError {
    /// The step that failed.
    pub fn phase(&self) -> Phase {
        match self {
            Self::Fetch(_) => Phase::Fetch,
            Self::Read { .. } => Phase::Read,
            Self::Splice(_) => Phase::Splice,
            Self::Update(_) => Phase::Update,
        }
    }
}
