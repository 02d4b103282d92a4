//! Confluence page types (REST API v2).

use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ConfluenceError;

/// Page as returned by `GET /wiki/api/v2/pages/{id}?body-format=storage`.
///
/// Every field is optional here; [`PageResponse::into_page`] enforces presence.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PageResponse {
    pub id: Option<String>,
    pub status: Option<String>,
    pub title: Option<String>,
    pub body: Option<Body>,
    pub version: Option<Version>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Body {
    pub storage: Option<Storage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Storage {
    pub value: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Version {
    pub number: Option<u32>,
}

impl PageResponse {
    /// Validate the response into a [`Page`].
    ///
    /// `status`, `title` and the storage body must be non-empty and the
    /// version must be non-zero. A missing `id` falls back to `page_id`.
    pub(crate) fn into_page(self, page_id: &str) -> Result<Page, ConfluenceError> {
        fn non_empty(value: Option<String>, field: &str) -> Result<String, ConfluenceError> {
            value
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ConfluenceError::MalformedResponse(format!("missing {field}")))
        }

        let body = self.body.and_then(|b| b.storage).and_then(|s| s.value);

        Ok(Page {
            id: self.id.unwrap_or_else(|| page_id.to_owned()),
            status: non_empty(self.status, "status")?,
            title: non_empty(self.title, "title")?,
            body: non_empty(body, "body.storage.value")?,
            version: self
                .version
                .and_then(|v| v.number)
                .filter(|&n| n > 0)
                .ok_or_else(|| {
                    ConfluenceError::MalformedResponse("missing version.number".to_owned())
                })?,
        })
    }
}

/// Current state of a Confluence page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Page ID.
    pub id: String,
    /// Page status (`current`, `draft`, ...).
    pub status: String,
    /// Page title.
    pub title: String,
    /// Body in storage format.
    pub body: String,
    /// Current version number.
    pub version: u32,
}

impl Page {
    /// Version number an update of this page must submit.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::MalformedResponse`] if the current version
    /// is already the largest representable one.
    pub fn next_version_number(&self) -> Result<u32, ConfluenceError> {
        self.version.checked_add(1).ok_or_else(|| {
            ConfluenceError::MalformedResponse(format!(
                "version.number {} cannot be incremented",
                self.version
            ))
        })
    }
}

/// Replacement content for a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageUpdate {
    /// Page ID.
    pub id: String,
    /// Page status, carried over from the fetched page.
    pub status: String,
    /// Page title, carried over from the fetched page.
    pub title: String,
    /// New body in storage format.
    pub body: String,
    /// Version number to submit (fetched version + 1).
    pub version: u32,
    /// Version message.
    pub message: String,
}

impl PageUpdate {
    /// Build the update that replaces `page`'s body, bumping its version.
    ///
    /// # Errors
    ///
    /// See [`Page::next_version_number`].
    pub fn next_version(
        page: &Page,
        body: String,
        message: &str,
    ) -> Result<Self, ConfluenceError> {
        Ok(Self {
            id: page.id.clone(),
            status: page.status.clone(),
            title: page.title.clone(),
            body,
            version: page.next_version_number()?,
            message: message.to_owned(),
        })
    }

    /// JSON payload for `PUT /wiki/api/v2/pages/{id}`.
    pub(crate) fn payload(&self) -> Value {
        json!({
            "id": self.id,
            "status": self.status,
            "title": self.title,
            "body": {
                "representation": "storage",
                "value": self.body
            },
            "version": {
                "number": self.version,
                "message": self.message
            }
        })
    }
}
