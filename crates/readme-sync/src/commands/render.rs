//! `readme-sync render` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use readme_sync_renderer::StorageRenderer;

use crate::error::CliError;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Path to the markdown file.
    markdown_file: PathBuf,
}

impl RenderArgs {
    /// Convert the markdown file and write the result to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or stdout cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let markdown_text = std::fs::read_to_string(&self.markdown_file)?;
        let storage = StorageRenderer::new().render(&markdown_text);

        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{storage}")?;
        Ok(())
    }
}
