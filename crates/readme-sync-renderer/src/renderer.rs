//! Markdown to Confluence storage format renderer.

use crate::languages::LanguageAliases;
use crate::passes::{CodeLanguage, CodeMacro, SectionLinks};
use crate::pipeline::Pipeline;

/// Renders markdown to Confluence XHTML storage format.
///
/// Stages, in order:
///
/// 1. `section_links`: `](##anchor` → `](#anchor`
/// 2. `code_language`: tag fence languages (with aliasing) for the macro pass
/// 3. `markdown`: structural conversion with table support
/// 4. `code_macro`: `<pre><code>` → `ac:structured-macro` with a CDATA body
///
/// # Example
///
/// ```
/// use readme_sync_renderer::StorageRenderer;
///
/// let html = StorageRenderer::new().render("```bash\nping example.com\n```");
/// assert!(html.contains(r#"<ac:parameter ac:name="language">shell</ac:parameter>"#));
/// assert!(html.contains("<![CDATA[ping example.com]]>"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct StorageRenderer {
    aliases: LanguageAliases,
}

impl StorageRenderer {
    /// Create a renderer with the default language aliases.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map fence language `from` to macro language `to`.
    #[must_use]
    pub fn with_language_alias(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.aliases.insert(from, to);
        self
    }

    /// Build the stage pipeline for this renderer.
    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new()
            .markdown_pass(SectionLinks)
            .markdown_pass(CodeLanguage::new(self.aliases.clone()))
            .html_pass(CodeMacro::new(self.aliases.clone()))
    }

    /// Render markdown to storage format.
    pub fn render(&self, markdown_text: &str) -> String {
        self.pipeline().run(markdown_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stage_order() {
        assert_eq!(
            StorageRenderer::new().pipeline().stage_names(),
            vec!["section_links", "code_language", "markdown", "code_macro"]
        );
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(StorageRenderer::new().render(""), "");
    }

    #[test]
    fn test_heading() {
        assert_eq!(StorageRenderer::new().render("# hi"), "<h1>hi</h1>");
    }

    #[test]
    fn test_section_links() {
        let html = StorageRenderer::new().render("[a](##a) [b](###b) [c](#c) [d](https://d.example)");
        assert_eq!(
            html,
            r##"<p><a href="#a">a</a> <a href="#b">b</a> <a href="#c">c</a> <a href="https://d.example">d</a></p>"##
        );
    }

    #[test]
    fn test_bash_block() {
        let html = StorageRenderer::new().render("```bash\nping example.com\n```\n");
        assert_eq!(
            html,
            r#"<ac:structured-macro ac:name="code"><ac:parameter ac:name="language">shell</ac:parameter><ac:plain-text-body><![CDATA[ping example.com]]></ac:plain-text-body></ac:structured-macro>"#
        );
    }

    #[test]
    fn test_declared_language_verbatim() {
        let html = StorageRenderer::new().render("```python\nprint('x')\n```");
        assert!(html.contains(r#"<ac:parameter ac:name="language">python</ac:parameter>"#), "{html}");
        assert!(html.contains("<![CDATA[print('x')]]>"), "{html}");
    }

    #[test]
    fn test_no_sentinel_leaks() {
        let markdown = "```bash\na\n```\n\n```\nb\n```\n\n~~~rust\nc\n~~~\n\n    indented\n";
        let html = StorageRenderer::new().render(markdown);
        assert!(!html.contains("$$$$$"), "{html}");
        assert!(!html.contains("<pre>"), "{html}");
        assert_eq!(html.matches(r#"<ac:structured-macro ac:name="code">"#).count(), 4);
    }

    #[test]
    fn test_html_special_characters_in_code() {
        let html = StorageRenderer::new().render("```html\n<a href=\"x\">&amp;</a>\n```");
        assert!(
            html.contains(r#"<![CDATA[<a href="x">&amp;</a>]]>"#),
            "{html}"
        );
    }

    #[test]
    fn test_multiline_code_keeps_inner_newlines() {
        let html = StorageRenderer::new().render("```sh\nline1\n\nline3\n```");
        assert!(html.contains("<![CDATA[line1\n\nline3]]>"), "{html}");
    }

    #[test]
    fn test_custom_alias() {
        let html = StorageRenderer::new()
            .with_language_alias("zsh", "shell")
            .render("~~~zsh\nls\n~~~");
        assert!(html.contains(r#"<ac:parameter ac:name="language">shell</ac:parameter>"#), "{html}");
    }

    #[test]
    fn test_link_inside_code_not_rewritten() {
        let html = StorageRenderer::new().render("```md\n[x](##x)\n```");
        assert!(html.contains("<![CDATA[[x](##x)]]>"), "{html}");
    }

    #[test]
    fn test_fence_text_in_indented_code_stays_literal() {
        let html = StorageRenderer::new().render("Example:\n\n    ```bash\n    ls\n    ```\n\nSee [a](##a).\n");
        assert!(!html.contains("$$$$$"), "{html}");
        assert!(html.contains("<![CDATA[```bash\nls\n```]]>"), "{html}");
        assert!(html.contains(r##"<a href="#a">a</a>"##), "{html}");
    }

    #[test]
    fn test_blockquote_code_block() {
        let html = StorageRenderer::new().render("> ```md\n> [x](##x)\n> ```\n");
        assert!(html.contains("<![CDATA[[x](##x)]]>"), "{html}");
        assert!(html.contains(r#"<ac:parameter ac:name="language">md</ac:parameter>"#), "{html}");
    }

    #[test]
    fn test_escaped_language_resolved_from_class() {
        let html = StorageRenderer::new().render("```c\\+\\+\nint x;\n```");
        assert!(html.contains(r#"<ac:parameter ac:name="language">c++</ac:parameter>"#), "{html}");
    }

    #[test]
    fn test_table() {
        let html = StorageRenderer::new().render("| a |\n|---|\n| 1 |");
        assert!(html.starts_with("<table>"), "{html}");
    }
}
