//! The two page requests the sync issues.

use serde_json::Value;

use crate::types::PageUpdate;

/// HTTP request against the pages endpoint.
#[derive(Debug, Clone, Copy)]
pub enum ApiCommand<'a> {
    /// Fetch a page with its storage-format body.
    GetPage {
        /// Page ID.
        page_id: &'a str,
    },
    /// Replace a page's body and bump its version.
    EditPage(&'a PageUpdate),
}

impl ApiCommand<'_> {
    /// HTTP method.
    pub fn method(&self) -> &'static str {
        match self {
            Self::GetPage { .. } => "GET",
            Self::EditPage(_) => "PUT",
        }
    }

    /// Path and query relative to the site root.
    pub fn path(&self) -> String {
        match self {
            Self::GetPage { page_id } => {
                format!("/wiki/api/v2/pages/{page_id}?body-format=storage")
            }
            Self::EditPage(update) => format!("/wiki/api/v2/pages/{}", update.id),
        }
    }

    /// JSON request body, if any.
    pub fn payload(&self) -> Option<Value> {
        match self {
            Self::GetPage { .. } => None,
            Self::EditPage(update) => Some(update.payload()),
        }
    }
}
