//! Result types for sync runs.

/// Outcome of a completed sync.
#[derive(Debug, Clone)]
pub struct SyncResult {
    /// Page ID.
    pub page_id: String,
    /// Page title (unchanged by the sync).
    pub title: String,
    /// Version the page had when fetched.
    pub previous_version: u32,
    /// Version submitted with the update.
    pub version: u32,
    /// Size in bytes of the new managed region.
    pub content_len: usize,
}

/// What a sync would do, computed without submitting anything.
#[derive(Debug, Clone)]
pub struct DryRunResult {
    /// Page title.
    pub title: String,
    /// Current page version.
    pub current_version: u32,
    /// Version an update would submit.
    pub next_version: u32,
    /// Current content of the managed region.
    pub current_content: String,
    /// Content the managed region would receive.
    pub new_content: String,
    /// Complete body that would be submitted.
    pub body: String,
}

impl DryRunResult {
    /// Whether the sync would leave the body unchanged.
    pub fn is_unchanged(&self) -> bool {
        self.current_content == self.new_content
    }
}
