//! Colored terminal reports for sync runs.
//!
//! Reports are built as plain `(Tone, text)` lines first and styled only when
//! written, so their content can be checked without a terminal.

use console::{Style, Term};
use readme_sync_confluence::{DryRunResult, SyncResult};

/// Color of a report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tone {
    Plain,
    Success,
    Warning,
    Heading,
}

/// A report line with its color.
type Line = (Tone, String);

/// Width of the rule framing region contents.
const RULE_WIDTH: usize = 70;

/// Terminal output formatter writing to stderr.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print the outcome of a completed sync.
    pub(crate) fn sync_result(&self, result: &SyncResult, base_url: &str) {
        self.report(&sync_report(result, base_url));
    }

    /// Print what a sync would change.
    pub(crate) fn dry_run_result(&self, result: &DryRunResult) {
        self.report(&dry_run_report(result));
    }

    fn report(&self, lines: &[Line]) {
        for (tone, text) in lines {
            let styled = match tone {
                Tone::Plain => text.clone(),
                Tone::Success => self.green.apply_to(text).to_string(),
                Tone::Warning => self.yellow.apply_to(text).to_string(),
                Tone::Heading => self.cyan_bold.apply_to(text).to_string(),
            };
            let _ = self.term.write_line(&styled);
        }
    }
}

fn plain(text: impl Into<String>) -> Line {
    (Tone::Plain, text.into())
}

fn sync_report(result: &SyncResult, base_url: &str) -> Vec<Line> {
    vec![
        (Tone::Success, "\nPage updated successfully!".to_owned()),
        plain(format!("ID: {}", result.page_id)),
        plain(format!("Title: {}", result.title)),
        plain(format!(
            "Version: {} -> {}",
            result.previous_version, result.version
        )),
        plain(format!("Managed region: {} bytes", result.content_len)),
        plain(format!(
            "URL: {base_url}/wiki/pages/viewpage.action?pageId={}",
            result.page_id
        )),
    ]
}

fn dry_run_report(result: &DryRunResult) -> Vec<Line> {
    let mut lines = vec![
        (Tone::Heading, "\n[DRY RUN] No changes made.".to_owned()),
        plain(format!(
            "Current page: \"{}\" (v{})",
            result.title, result.current_version
        )),
        plain(format!("Next version: v{}", result.next_version)),
        plain(format!(
            "Managed region: {} bytes -> {} bytes",
            result.current_content.len(),
            result.new_content.len()
        )),
    ];

    if result.is_unchanged() {
        lines.push((Tone::Success, "\nManaged region is already up to date.".to_owned()));
        return lines;
    }

    let rule = "=".repeat(RULE_WIDTH);
    lines.push((Tone::Warning, "\nManaged region would change.".to_owned()));
    lines.push(plain("Current:"));
    lines.push(plain(rule.as_str()));
    lines.push(plain(result.current_content.as_str()));
    lines.push(plain(rule.as_str()));
    lines.push(plain("New:"));
    lines.push(plain(rule.as_str()));
    lines.push(plain(result.new_content.as_str()));
    lines.push(plain(rule));
    lines
}
