//! Confluence integration for readme-sync.
//!
//! This crate keeps a region of a Confluence page in sync with a markdown file:
//! - [`ConfluenceClient`]: REST API v2 client with Basic authentication
//! - [`splice`]: marker-delimited replacement inside a page body
//! - [`PageSync`]: fetch, convert, splice and update workflow
//!
//! # API Client
//!
//! ```no_run
//! # fn main() -> Result<(), readme_sync_confluence::ConfluenceError> {
//! use readme_sync_confluence::{ConfluenceClient, PageApi};
//!
//! let client = ConfluenceClient::new("https://example.atlassian.net", "bot@example.com", "token");
//!
//! let page = client.get_page("123")?;
//! println!("Page title: {}", page.title);
//! # Ok(())
//! # }
//! ```

// API client
mod client;
pub use client::{ApiCommand, ConfluenceClient};

// Types
mod types;
pub use types::{Page, PageUpdate};

// Boundary markers
pub mod splice;
pub use splice::{BoundaryMarkers, SpliceError, splice};

// Page sync
pub mod updater;
pub use updater::{DryRunResult, PageSync, Phase, SyncError, SyncResult, UpdateConfig};

// Errors
pub mod error;
pub use error::ConfluenceError;

/// Page operations the sync workflow needs.
///
/// Implemented by [`ConfluenceClient`]; tests substitute an in-memory page.
pub trait PageApi {
    /// Fetch a page with its storage-format body.
    ///
    /// Fails with [`ConfluenceError::MalformedResponse`] if the response
    /// lacks the status, title, body or version.
    fn get_page(&self, page_id: &str) -> Result<Page, ConfluenceError>;

    /// Submit a new body and version for a page.
    fn update_page(&self, update: &PageUpdate) -> Result<(), ConfluenceError>;
}
