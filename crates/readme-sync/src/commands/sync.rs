//! `readme-sync sync` command implementation.

use std::path::PathBuf;

use clap::Args;
use readme_sync_config::{CliSettings, Config};
use readme_sync_confluence::{ConfluenceClient, PageSync, UpdateConfig};
use tracing::info;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sync command.
///
/// Flags fall back to the GitHub Action inputs (`INPUT_*`), then to
/// `readme-sync.toml`.
#[derive(Args)]
pub(crate) struct SyncArgs {
    /// Path to configuration file (default: auto-discover readme-sync.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the markdown file.
    #[arg(short, long, env = "INPUT_FILEPATH")]
    file: Option<PathBuf>,

    /// Confluence page URL.
    #[arg(long, env = "INPUT_URL")]
    url: Option<String>,

    /// Confluence account email or username.
    #[arg(short, long, env = "INPUT_USERNAME")]
    username: Option<String>,

    /// Confluence API token.
    #[arg(short, long, env = "INPUT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Text marking the start of the managed region.
    #[arg(long, env = "INPUT_INSERT_START_TEXT")]
    start: Option<String>,

    /// Text marking the end of the managed region.
    #[arg(long, env = "INPUT_INSERT_END_TEXT")]
    end: Option<String>,

    /// Version message for the update.
    #[arg(short, long)]
    message: Option<String>,

    /// Preview changes without updating Confluence.
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl SyncArgs {
    /// Execute the sync command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is incomplete or any sync
    /// phase fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        info!("Starting README sync...");

        let dry_run = self.dry_run;
        let config_path = self.config.clone();
        let config = Config::load(config_path.as_deref(), Some(&self.into_cli_settings()))?;
        let settings = config.settings()?;

        let client = ConfluenceClient::new(
            &settings.page.base_url,
            &settings.username,
            &settings.token,
        );
        let sync = PageSync::new(&client, UpdateConfig::from_settings(&settings));

        if dry_run {
            let result = sync.dry_run(&settings.markdown_path)?;
            output.dry_run_result(&result);
        } else {
            let result = sync.update(&settings.markdown_path)?;
            output.sync_result(&result, client.base_url());
        }

        Ok(())
    }

    fn into_cli_settings(self) -> CliSettings {
        CliSettings {
            filepath: self.file,
            page_url: self.url,
            username: self.username,
            token: self.token,
            insert_start_text: self.start,
            insert_end_text: self.end,
            version_message: self.message,
        }
    }
}
