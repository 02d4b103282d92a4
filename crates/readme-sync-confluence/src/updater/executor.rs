//! Page sync implementation.

use std::path::Path;

use tracing::{debug, info};

use crate::PageApi;
use crate::types::{Page, PageUpdate};

use super::UpdateConfig;
use super::error::{Phase, SyncError};
use super::result::{DryRunResult, SyncResult};

/// Syncs a markdown file into the managed region of a Confluence page.
pub struct PageSync<'a> {
    api: &'a dyn PageApi,
    config: UpdateConfig,
}

/// Page state and spliced body, ready for submission.
struct Prepared {
    page: Page,
    content: String,
    body: String,
}

impl<'a> PageSync<'a> {
    /// Create a new page sync.
    #[must_use]
    pub fn new(api: &'a dyn PageApi, config: UpdateConfig) -> Self {
        Self { api, config }
    }

    /// Sync the markdown file at `markdown_path` into the page.
    ///
    /// # Errors
    ///
    /// Returns a [`SyncError`] naming the failed phase. The page is only
    /// written if every earlier phase succeeded.
    pub fn update(&self, markdown_path: &Path) -> Result<SyncResult, SyncError> {
        let Prepared {
            page,
            content,
            body,
        } = self.prepare(markdown_path)?;

        let update = PageUpdate::next_version(&page, body, &self.config.version_message)
            .map_err(SyncError::Fetch)?;
        info!(phase = %Phase::Update, "Updating confluence page.");
        self.api.update_page(&update).map_err(SyncError::Update)?;
        info!("Sync successful!");

        Ok(SyncResult {
            page_id: update.id,
            title: update.title,
            previous_version: page.version,
            version: update.version,
            content_len: content.len(),
        })
    }

    /// Run every phase except the update.
    ///
    /// # Errors
    ///
    /// Same as [`update`](Self::update), minus update failures.
    pub fn dry_run(&self, markdown_path: &Path) -> Result<DryRunResult, SyncError> {
        let Prepared {
            page,
            content,
            body,
        } = self.prepare(markdown_path)?;

        let next_version = page.next_version_number().map_err(SyncError::Fetch)?;
        let region = self.config.markers.locate(&page.body)?;
        Ok(DryRunResult {
            current_content: page.body[region].to_owned(),
            new_content: content,
            next_version,
            current_version: page.version,
            title: page.title,
            body,
        })
    }

    fn prepare(&self, markdown_path: &Path) -> Result<Prepared, SyncError> {
        info!(phase = %Phase::Fetch, "Getting confluence page content.");
        let page = self
            .api
            .get_page(&self.config.page_id)
            .map_err(SyncError::Fetch)?;
        debug!(
            title = %page.title,
            version = page.version,
            body_len = page.body.len(),
            "fetched page"
        );

        info!(phase = %Phase::Read, "Reading markdown file.");
        let markdown_text =
            std::fs::read_to_string(markdown_path).map_err(|source| SyncError::Read {
                path: markdown_path.to_path_buf(),
                source,
            })?;

        info!(phase = %Phase::Transform, "Converting markdown file.");
        let content = self.config.renderer.render(&markdown_text);

        debug!(phase = %Phase::Splice, content_len = content.len(), "splicing content");
        let body = self.config.markers.splice(&page.body, &content)?;

        Ok(Prepared {
            page,
            content,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::error::ConfluenceError;
    use crate::splice::{BoundaryMarkers, SpliceError};

    /// In-memory page that applies updates like Confluence does.
    struct MemoryPage {
        page: RefCell<Page>,
        updates: RefCell<Vec<PageUpdate>>,
        get_failure: Option<(u16, &'static str)>,
        update_failure: Option<(u16, &'static str)>,
    }

    impl MemoryPage {
        fn new(body: &str, version: u32) -> Self {
            Self {
                page: RefCell::new(Page {
                    id: "1234567890".to_owned(),
                    status: "current".to_owned(),
                    title: "Readme".to_owned(),
                    body: body.to_owned(),
                    version,
                }),
                updates: RefCell::new(Vec::new()),
                get_failure: None,
                update_failure: None,
            }
        }
    }

    impl PageApi for MemoryPage {
        fn get_page(&self, page_id: &str) -> Result<Page, ConfluenceError> {
            if let Some((status, body)) = self.get_failure {
                return Err(ConfluenceError::HttpResponse {
                    status,
                    body: body.to_owned(),
                });
            }
            let page = self.page.borrow().clone();
            assert_eq!(page.id, page_id);
            Ok(page)
        }

        fn update_page(&self, update: &PageUpdate) -> Result<(), ConfluenceError> {
            if let Some((status, body)) = self.update_failure {
                return Err(ConfluenceError::HttpResponse {
                    status,
                    body: body.to_owned(),
                });
            }
            let mut page = self.page.borrow_mut();
            page.body.clone_from(&update.body);
            page.version = update.version;
            self.updates.borrow_mut().push(update.clone());
            Ok(())
        }
    }

    fn config() -> UpdateConfig {
        UpdateConfig::new(
            "1234567890",
            BoundaryMarkers::new("<p>start</p>", "<p>end</p>"),
        )
    }

    fn markdown_file(dir: &TempDir, text: &str) -> PathBuf {
        let path = dir.path().join("README.md");
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_update_splices_and_bumps_version() {
        let dir = TempDir::new().unwrap();
        let path = markdown_file(&dir, "# hi\n");
        let api = MemoryPage::new("<p>start</p><p>end</p>", 5);

        let result = PageSync::new(&api, config()).update(&path).unwrap();

        let updates = api.updates.borrow();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].body, "<p>start</p><h1>hi</h1><p>end</p>");
        assert_eq!(updates[0].version, 6);
        assert_eq!(updates[0].title, "Readme");
        assert_eq!(updates[0].status, "current");
        assert_eq!(result.previous_version, 5);
        assert_eq!(result.version, 6);
        assert_eq!(result.content_len, "<h1>hi</h1>".len());
    }

    #[test]
    fn test_update_bash_block_becomes_shell_macro() {
        let dir = TempDir::new().unwrap();
        let path = markdown_file(&dir, "```bash\nping example.com\n```\n");
        let api = MemoryPage::new("<p>start</p><p>end</p>", 1);

        PageSync::new(&api, config()).update(&path).unwrap();

        let body = api.page.borrow().body.clone();
        assert!(
            body.contains(r#"<ac:parameter ac:name="language">shell</ac:parameter><ac:plain-text-body><![CDATA[ping example.com]]></ac:plain-text-body>"#),
            "{body}"
        );
    }

    #[test]
    fn test_repeated_sync_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let body = "<p>intro</p><p>start</p><p>stale</p><p>end</p><p>outro</p>";
        let api = MemoryPage::new(body, 1);
        let sync = PageSync::new(&api, config());

        sync.update(&markdown_file(&dir, "first")).unwrap();
        sync.update(&markdown_file(&dir, "second")).unwrap();

        let page = api.page.borrow();
        assert_eq!(
            page.body,
            "<p>intro</p><p>start</p><p>second</p><p>end</p><p>outro</p>"
        );
        assert_eq!(page.version, 3);
    }

    #[test]
    fn test_missing_marker_aborts_before_update() {
        let dir = TempDir::new().unwrap();
        let path = markdown_file(&dir, "text");
        let api = MemoryPage::new("<p>start</p> no end marker", 1);

        let err = PageSync::new(&api, config()).update(&path).unwrap_err();

        assert_eq!(err.phase(), Phase::Splice);
        assert!(matches!(
            err,
            SyncError::Splice(SpliceError::EndNotFound(_))
        ));
        assert!(api.updates.borrow().is_empty());
    }

    #[test]
    fn test_fetch_failure_is_reported_first() {
        let dir = TempDir::new().unwrap();
        let mut api = MemoryPage::new("<p>start</p><p>end</p>", 1);
        api.get_failure = Some((404, "page not found"));

        let err = PageSync::new(&api, config())
            .update(&dir.path().join("missing.md"))
            .unwrap_err();

        assert_eq!(err.phase(), Phase::Fetch);
        assert!(err.to_string().contains("page not found"), "{err}");
    }

    #[test]
    fn test_read_failure() {
        let dir = TempDir::new().unwrap();
        let api = MemoryPage::new("<p>start</p><p>end</p>", 1);

        let err = PageSync::new(&api, config())
            .update(&dir.path().join("missing.md"))
            .unwrap_err();

        assert_eq!(err.phase(), Phase::Read);
        assert!(err.to_string().contains("missing.md"), "{err}");
        assert!(api.updates.borrow().is_empty());
    }

    #[test]
    fn test_update_failure_surfaced_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = markdown_file(&dir, "text");
        let mut api = MemoryPage::new("<p>start</p><p>end</p>", 1);
        api.update_failure = Some((409, r#"{"message":"Version must be incremented"}"#));

        let err = PageSync::new(&api, config()).update(&path).unwrap_err();

        assert_eq!(err.phase(), Phase::Update);
        assert!(
            matches!(
                &err,
                SyncError::Update(ConfluenceError::HttpResponse { status: 409, body })
                    if body == r#"{"message":"Version must be incremented"}"#
            ),
            "{err:?}"
        );
    }

    #[test]
    fn test_dry_run_does_not_update() {
        let dir = TempDir::new().unwrap();
        let path = markdown_file(&dir, "new");
        let api = MemoryPage::new("<p>start</p><p>old</p><p>end</p>", 4);

        let result = PageSync::new(&api, config()).dry_run(&path).unwrap();

        assert!(api.updates.borrow().is_empty());
        assert_eq!(result.current_version, 4);
        assert_eq!(result.next_version, 5);
        assert_eq!(result.current_content, "<p>old</p>");
        assert_eq!(result.new_content, "<p>new</p>");
        assert_eq!(result.body, "<p>start</p><p>new</p><p>end</p>");
        assert!(!result.is_unchanged());
    }

    #[test]
    fn test_custom_version_message() {
        let dir = TempDir::new().unwrap();
        let path = markdown_file(&dir, "x");
        let api = MemoryPage::new("<p>start</p><p>end</p>", 1);

        PageSync::new(&api, config().version_message("docs sync"))
            .update(&path)
            .unwrap();

        assert_eq!(api.updates.borrow()[0].message, "docs sync");
    }

    #[test]
    fn test_maximum_version_aborts_before_update() {
        let dir = TempDir::new().unwrap();
        let path = markdown_file(&dir, "text");
        let api = MemoryPage::new("<p>start</p><p>end</p>", u32::MAX);
        let sync = PageSync::new(&api, config());

        let err = sync.update(&path).unwrap_err();
        assert_eq!(err.phase(), Phase::Fetch);
        assert!(
            matches!(err, SyncError::Fetch(ConfluenceError::MalformedResponse(_))),
            "{err:?}"
        );
        assert!(api.updates.borrow().is_empty());

        let err = sync.dry_run(&path).unwrap_err();
        assert_eq!(err.phase(), Phase::Fetch);
    }
}
