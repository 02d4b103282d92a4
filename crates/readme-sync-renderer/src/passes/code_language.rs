//! Carry fenced code block languages through markdown conversion.
//!
//! The converter only exposes a fence's language as a `language-*` class on
//! the generated `<code>` element. This pass resolves the Confluence language
//! up front and wraps it in a sentinel so the macro pass can tell a tagged
//! language apart from a raw class value. The macro pass strips the sentinel.
//!
//! Fence openers are found by the markdown parser, so fence-like text inside
//! indented code or another fence is never tagged.

use crate::code_regions::fence_languages;
use crate::languages::LanguageAliases;
use crate::pipeline::MarkdownPass;

/// Delimiter placed on both sides of a tagged language.
const SENTINEL: &str = "$$$$$";

/// Wrap a resolved language in the sentinel.
fn tag(language: &str) -> String {
    format!("{SENTINEL}{language}{SENTINEL}")
}

/// Extract the language from a sentinel-wrapped value.
pub(crate) fn untag(value: &str) -> Option<&str> {
    value
        .strip_prefix(SENTINEL)?
        .strip_suffix(SENTINEL)
        .filter(|language| !language.is_empty())
}

/// Tags the language of fenced code block openers.
#[derive(Debug, Clone, Default)]
pub struct CodeLanguage {
    aliases: LanguageAliases,
}

impl CodeLanguage {
    /// Create the pass with the given alias table.
    #[must_use]
    pub fn new(aliases: LanguageAliases) -> Self {
        Self { aliases }
    }
}

impl MarkdownPass for CodeLanguage {
    fn name(&self) -> &'static str {
        "code_language"
    }

    fn run(&self, markdown: &str) -> String {
        let mut output = String::with_capacity(markdown.len());
        let mut cursor = 0;

        for range in fence_languages(markdown) {
            let language = &markdown[range.clone()];
            if untag(language).is_some() {
                continue;
            }
            output.push_str(&markdown[cursor..range.start]);
            output.push_str(&tag(self.aliases.resolve(language)));
            cursor = range.end;
        }
        output.push_str(&markdown[cursor..]);

        output
    }
}
