//! Page sync workflow.
//!
//! This module provides the [`PageSync`] struct that runs one sync of a
//! markdown file into the managed region of a Confluence page:
//!
//! 1. Fetch the current page and validate the response
//! 2. Read the markdown file
//! 3. Convert markdown to Confluence storage format
//! 4. Splice the result between the boundary markers
//! 5. Submit the new body with the version bumped by one
//!
//! Any failure aborts the run; nothing is retried and nothing is written
//! unless every earlier step succeeded.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use readme_sync_confluence::{BoundaryMarkers, ConfluenceClient, PageSync, UpdateConfig};
//!
//! let client = ConfluenceClient::new("https://example.atlassian.net", "bot@example.com", "token");
//! let config = UpdateConfig::new("123456", BoundaryMarkers::new("<p>start</p>", "<p>end</p>"));
//! let sync = PageSync::new(&client, config);
//!
//! // Perform update
//! let result = sync.update(Path::new("README.md"))?;
//!
//! // Or dry-run to preview changes
//! let dry_run = sync.dry_run(Path::new("README.md"))?;
//! # Ok(())
//! # }
//! ```

mod error;
mod executor;
mod result;

pub use error::{Phase, SyncError};
pub use executor::PageSync;
pub use result::{DryRunResult, SyncResult};

use readme_sync_config::{DEFAULT_VERSION_MESSAGE, SyncSettings};
use readme_sync_renderer::StorageRenderer;

use crate::splice::BoundaryMarkers;

/// Configuration for syncing markdown into a Confluence page.
#[derive(Debug, Clone)]
pub struct UpdateConfig {
    /// Target page ID.
    pub page_id: String,
    /// Markers delimiting the managed region.
    pub markers: BoundaryMarkers,
    /// Version message for the update.
    pub version_message: String,
    /// Markdown renderer.
    pub renderer: StorageRenderer,
}

impl UpdateConfig {
    /// Create a config with the default message and renderer.
    pub fn new(page_id: impl Into<String>, markers: BoundaryMarkers) -> Self {
        Self {
            page_id: page_id.into(),
            markers,
            version_message: DEFAULT_VERSION_MESSAGE.to_owned(),
            renderer: StorageRenderer::new(),
        }
    }

    /// Create a config from validated settings.
    pub fn from_settings(settings: &SyncSettings) -> Self {
        Self::new(
            settings.page.page_id.clone(),
            BoundaryMarkers::new(
                settings.insert_start_text.clone(),
                settings.insert_end_text.clone(),
            ),
        )
        .version_message(settings.version_message.clone())
    }

    /// Set the version message.
    #[must_use]
    pub fn version_message(mut self, message: impl Into<String>) -> Self {
        self.version_message = message.into();
        self
    }
}
