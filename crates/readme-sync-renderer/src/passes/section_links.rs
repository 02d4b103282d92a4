//! Collapse multi-hash section links.
//!
//! Confluence resolves in-page anchors written with a single `#` only, while
//! tables of contents in READMEs often use `##heading`.

use std::sync::LazyLock;

use regex::Regex;

use crate::code_regions::{code_ranges, rewrite_outside};
use crate::pipeline::MarkdownPass;

static MULTI_HASH_TARGET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\]\(##+").unwrap());

/// Rewrites `](##anchor)` link targets to `](#anchor)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionLinks;

impl MarkdownPass for SectionLinks {
    fn name(&self) -> &'static str {
        "section_links"
    }

    fn run(&self, markdown: &str) -> String {
        let code = code_ranges(markdown);
        rewrite_outside(markdown, &code, |text| MULTI_HASH_TARGET.replace_all(text, "](#"))
    }
}
