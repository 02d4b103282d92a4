//! Code regions of a markdown document, located by the markdown parser.
//!
//! Markdown passes rewrite prose only. Code blocks (fenced or indented, at
//! any nesting depth) and inline code spans must reach the converter
//! untouched, so their byte ranges come from the same parser and options the
//! converter uses instead of from line heuristics.

use std::borrow::Cow;
use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag};

use crate::pipeline::PARSER_OPTIONS;

/// Byte ranges of code blocks and inline code spans, in document order.
pub(crate) fn code_ranges(markdown: &str) -> Vec<Range<usize>> {
    Parser::new_ext(markdown, PARSER_OPTIONS)
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Start(Tag::CodeBlock(_)) | Event::Code(_) => Some(range),
            _ => None,
        })
        .collect()
}

/// Byte ranges of the language word in fenced code block openers.
///
/// Only fences whose language is written literally in the source are
/// reported; a language spelled with escapes or entities is left to the
/// converter.
pub(crate) fn fence_languages(markdown: &str) -> Vec<Range<usize>> {
    Parser::new_ext(markdown, PARSER_OPTIONS)
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                let language = info.split_whitespace().next()?;
                let found = language_in_opener(markdown, range.start)?;
                (&markdown[found.clone()] == language).then_some(found)
            }
            _ => None,
        })
        .collect()
}

/// Locate the first word after the fence run on the opener line at `start`.
fn language_in_opener(markdown: &str, start: usize) -> Option<Range<usize>> {
    let line_end = markdown[start..]
        .find('\n')
        .map_or(markdown.len(), |offset| start + offset);
    let line = &markdown[start..line_end];

    // Container prefixes (`>`, list markers, indentation) precede the fence.
    let fence_at = line.find(['`', '~'])?;
    let fence_char = line[fence_at..].chars().next()?;
    let fence_len = line[fence_at..]
        .find(|c: char| c != fence_char)
        .unwrap_or(line.len() - fence_at);

    let info = &line[fence_at + fence_len..];
    let word_at = fence_at + fence_len + (info.len() - info.trim_start().len());
    let word_len = line[word_at..]
        .find(char::is_whitespace)
        .unwrap_or(line.len() - word_at);

    (word_len > 0).then(|| start + word_at..start + word_at + word_len)
}

/// Apply `rewrite` to the text between `skip` ranges, copying the ranges as-is.
///
/// `skip` must be sorted by start; overlapping ranges are tolerated.
pub(crate) fn rewrite_outside<'a, F>(
    input: &'a str,
    skip: &[Range<usize>],
    mut rewrite: F,
) -> String
where
    F: FnMut(&'a str) -> Cow<'a, str>,
{
    let mut output = String::with_capacity(input.len());
    let mut cursor = 0;

    for range in skip {
        if range.end <= cursor {
            continue;
        }
        let start = range.start.max(cursor);
        output.push_str(&rewrite(&input[cursor..start]));
        output.push_str(&input[start..range.end]);
        cursor = range.end;
    }
    output.push_str(&rewrite(&input[cursor..]));

    output
}
