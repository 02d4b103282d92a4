//! Replace HTML code blocks with the Confluence code macro.
//!
//! Produces:
//!
//! ```text
//! <ac:structured-macro ac:name="code">
//!   <ac:parameter ac:name="language">shell</ac:parameter>
//!   <ac:plain-text-body><![CDATA[ping example.com]]></ac:plain-text-body>
//! </ac:structured-macro>
//! ```
//!
//! (without the whitespace). Blocks without a language get no language
//! parameter, leaving the choice to Confluence's default.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::languages::LanguageAliases;
use crate::passes::code_language::untag;
use crate::pipeline::HtmlPass;
use crate::util::{escape_html, unescape_html};

static CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<pre><code(?: class="language-([^"]*)")?>(.*?)</code></pre>"#).unwrap()
});

/// Rewrites `<pre><code>` blocks into code macros.
#[derive(Debug, Clone, Default)]
pub struct CodeMacro {
    aliases: LanguageAliases,
}

impl CodeMacro {
    /// Create the pass with the alias table used for untagged languages.
    #[must_use]
    pub fn new(aliases: LanguageAliases) -> Self {
        Self { aliases }
    }

    fn language(&self, class_value: &str) -> Option<String> {
        let raw = unescape_html(class_value);
        if let Some(tagged) = untag(&raw) {
            return Some(tagged.to_owned());
        }
        // Languages the tagging pass skips (escaped info strings) still carry a class.
        (!raw.is_empty()).then(|| self.aliases.resolve(&raw).to_owned())
    }

    fn render(&self, caps: &Captures<'_>) -> String {
        let mut out = String::from(r#"<ac:structured-macro ac:name="code">"#);
        if let Some(language) = caps.get(1).and_then(|m| self.language(m.as_str())) {
            write!(
                out,
                r#"<ac:parameter ac:name="language">{}</ac:parameter>"#,
                escape_html(&language)
            )
            .unwrap();
        }

        let code = unescape_html(&caps[2]);
        let code = code.strip_suffix('\n').unwrap_or(&code);
        // CDATA content is not escaped; only its terminator must be split.
        write!(
            out,
            "<ac:plain-text-body><![CDATA[{}]]></ac:plain-text-body>",
            code.replace("]]>", "]]]]><![CDATA[>")
        )
        .unwrap();
        out.push_str("</ac:structured-macro>");
        out
    }
}

impl HtmlPass for CodeMacro {
    fn name(&self) -> &'static str {
        "code_macro"
    }

    fn run(&self, html: &str) -> String {
        CODE_BLOCK
            .replace_all(html, |caps: &Captures<'_>| self.render(caps))
            .into_owned()
    }
}
