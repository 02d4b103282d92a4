//! Marker-delimited replacement inside a page body.
//!
//! The managed region of a page is the text strictly between the first
//! occurrence of the start marker and the first occurrence of the end marker.
//! Splicing replaces that region and nothing else: both markers and all text
//! outside them are kept byte for byte, and no separators are added.
//!
//! Because both searches take the leftmost match, the inserted content must
//! not contain either marker, and neither marker may appear earlier in the
//! page than the intended boundary. Repeated syncs then always find the same
//! region, which makes them idempotent.

use std::ops::Range;

/// Boundary error: the managed region cannot be located.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpliceError {
    /// A marker is the empty string.
    #[error("boundary marker is empty")]
    EmptyMarker,

    /// Start marker absent from the page body.
    #[error("start marker not found in page body: {0:?}")]
    StartNotFound(String),

    /// End marker absent from the page body.
    #[error("end marker not found in page body: {0:?}")]
    EndNotFound(String),

    /// End marker's first occurrence does not come after the start marker.
    #[error("end marker (byte {end}) does not follow start marker (byte {start})")]
    OutOfOrder {
        /// Byte offset of the start marker.
        start: usize,
        /// Byte offset of the end marker.
        end: usize,
    },
}

/// Start/end text pair delimiting the managed region of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryMarkers {
    start: String,
    end: String,
}

impl BoundaryMarkers {
    /// Create a marker pair.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Start marker text.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// End marker text.
    pub fn end(&self) -> &str {
        &self.end
    }

    /// Byte range of the managed region in `body`.
    ///
    /// The range starts right after the start marker and ends right before
    /// the end marker; it is empty when the markers are adjacent.
    ///
    /// # Errors
    ///
    /// Returns a [`SpliceError`] when a marker is empty or missing, or when
    /// the end marker does not begin after the start marker ends.
    pub fn locate(&self, body: &str) -> Result<Range<usize>, SpliceError> {
        if self.start.is_empty() || self.end.is_empty() {
            return Err(SpliceError::EmptyMarker);
        }

        let start = body
            .find(&self.start)
            .ok_or_else(|| SpliceError::StartNotFound(self.start.clone()))?;
        let end = body
            .find(&self.end)
            .ok_or_else(|| SpliceError::EndNotFound(self.end.clone()))?;

        let region_start = start + self.start.len();
        if end < region_start {
            return Err(SpliceError::OutOfOrder { start, end });
        }
        Ok(region_start..end)
    }

    /// Replace the managed region of `body` with `content`.
    ///
    /// # Errors
    ///
    /// See [`locate`](Self::locate).
    pub fn splice(&self, body: &str, content: &str) -> Result<String, SpliceError> {
        let region = self.locate(body)?;

        let mut out = String::with_capacity(body.len() - region.len() + content.len());
        out.push_str(&body[..region.start]);
        out.push_str(content);
        out.push_str(&body[region.end..]);
        Ok(out)
    }
}

/// Replace the text between `start` and `end` in `body` with `content`.
///
/// Shorthand for [`BoundaryMarkers::splice`].
///
/// # Errors
///
/// See [`BoundaryMarkers::locate`].
pub fn splice(body: &str, start: &str, end: &str, content: &str) -> Result<String, SpliceError> {
    BoundaryMarkers::new(start, end).splice(body, content)
}
