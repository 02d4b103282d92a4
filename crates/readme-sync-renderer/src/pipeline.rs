//! Ordered rewrite pipeline around the markdown converter.
//!
//! A [`Pipeline`] holds two typed stage lists: [`MarkdownPass`]es that rewrite
//! the markdown source before conversion, and [`HtmlPass`]es that rewrite the
//! converted HTML. The split is enforced by the types, so an HTML pass can
//! never run before conversion and vice versa. Within each list stages run in
//! the order they were added.

use pulldown_cmark::{Options, Parser, html};
use tracing::debug;

/// Parser options shared by the converter and the code region scan.
pub(crate) const PARSER_OPTIONS: Options = Options::ENABLE_TABLES;

/// Name reported for the structural conversion stage.
pub const CONVERT_STAGE: &str = "markdown";

/// A rewrite applied to markdown source before conversion.
pub trait MarkdownPass {
    /// Stable stage name, used for ordering checks and logging.
    fn name(&self) -> &'static str;

    /// Rewrite the markdown text.
    fn run(&self, markdown: &str) -> String;
}

/// A rewrite applied to the converted HTML.
pub trait HtmlPass {
    /// Stable stage name, used for ordering checks and logging.
    fn name(&self) -> &'static str;

    /// Rewrite the HTML text.
    fn run(&self, html: &str) -> String;
}

/// Markdown → storage format pipeline.
#[derive(Default)]
pub struct Pipeline {
    markdown_passes: Vec<Box<dyn MarkdownPass>>,
    html_passes: Vec<Box<dyn HtmlPass>>,
}

impl Pipeline {
    /// Create a pipeline that only performs structural conversion.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a markdown pass.
    #[must_use]
    pub fn markdown_pass(mut self, pass: impl MarkdownPass + 'static) -> Self {
        self.markdown_passes.push(Box::new(pass));
        self
    }

    /// Append an HTML pass.
    #[must_use]
    pub fn html_pass(mut self, pass: impl HtmlPass + 'static) -> Self {
        self.html_passes.push(Box::new(pass));
        self
    }

    /// Stage names in execution order, including the conversion stage.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.markdown_passes
            .iter()
            .map(|pass| pass.name())
            .chain(std::iter::once(CONVERT_STAGE))
            .chain(self.html_passes.iter().map(|pass| pass.name()))
            .collect()
    }

    /// Run every stage over `markdown` and return the final HTML.
    pub fn run(&self, markdown: &str) -> String {
        let mut text = markdown.to_owned();
        for pass in &self.markdown_passes {
            text = pass.run(&text);
            debug!(stage = pass.name(), len = text.len(), "markdown pass done");
        }

        let mut text = convert(&text);
        debug!(stage = CONVERT_STAGE, len = text.len(), "conversion done");

        for pass in &self.html_passes {
            text = pass.run(&text);
            debug!(stage = pass.name(), len = text.len(), "html pass done");
        }
        text
    }
}

/// Convert markdown (with tables) to HTML.
///
/// The trailing newline after the last block is dropped so the output can be
/// spliced directly against surrounding markup.
fn convert(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, PARSER_OPTIONS);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out.truncate(out.trim_end_matches('\n').len());
    out
}
