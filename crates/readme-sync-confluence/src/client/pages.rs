//! Page operations for Confluence API.

use tracing::info;

use super::{ApiCommand, ConfluenceClient};
use crate::PageApi;
use crate::error::ConfluenceError;
use crate::types::{Page, PageResponse, PageUpdate};

impl PageApi for ConfluenceClient {
    fn get_page(&self, page_id: &str) -> Result<Page, ConfluenceError> {
        info!("Getting page {}", page_id);

        let body = self.send(&ApiCommand::GetPage { page_id })?;
        let response: PageResponse = serde_json::from_str(&body)?;
        response.into_page(page_id)
    }

    fn update_page(&self, update: &PageUpdate) -> Result<(), ConfluenceError> {
        info!(
            "Updating page {} from version {} to {}",
            update.id,
            update.version.saturating_sub(1),
            update.version
        );

        self.send(&ApiCommand::EditPage(update))?;
        Ok(())
    }
}
