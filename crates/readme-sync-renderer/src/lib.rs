//! Markdown to Confluence storage format conversion.
//!
//! The conversion is a [`Pipeline`] of named stages around a `CommonMark`
//! converter:
//!
//! - markdown passes rewrite the source before conversion
//!   (skipping code blocks and inline code), see [`passes`]
//! - the converter produces generic HTML (with tables)
//! - HTML passes rewrite the converted document into Confluence macros
//!
//! [`StorageRenderer`] assembles the standard pipeline. [`transform`] is a
//! shorthand for rendering with the default configuration.
//!
//! # Example
//!
//! ```
//! let html = readme_sync_renderer::transform("# Install\n\nSee [usage](##usage).");
//! assert_eq!(html, "<h1>Install</h1>\n<p>See <a href=\"#usage\">usage</a>.</p>");
//! ```

mod code_regions;
mod languages;
pub mod passes;
mod pipeline;
mod renderer;
mod util;

pub use languages::LanguageAliases;
pub use pipeline::{CONVERT_STAGE, HtmlPass, MarkdownPass, Pipeline};
pub use renderer::StorageRenderer;

/// Render markdown to Confluence storage format with default settings.
pub fn transform(markdown_text: &str) -> String {
    StorageRenderer::new().render(markdown_text)
}
