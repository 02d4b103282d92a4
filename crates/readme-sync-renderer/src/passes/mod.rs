//! Confluence-specific rewrite passes.

mod code_language;
mod code_macro;
mod section_links;

pub use code_language::CodeLanguage;
pub use code_macro::CodeMacro;
pub use section_links::SectionLinks;
