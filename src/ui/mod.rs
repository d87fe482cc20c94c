//! Terminal presentation: the [`Reporter`] capability, result tables and
//! the selection prompt.
//!
//! The pipeline never writes to the terminal directly. Everything user-facing
//! goes through a [`Reporter`], so searches and downloads can run headless
//! against a [`RecordingReporter`].

mod recording;
mod reporter;
mod select;

pub use recording::RecordingReporter;
pub use reporter::{Reporter, TerminalReporter};
pub use select::{parse_choice, select_result, Selection, SelectionError, SELECT_PROMPT};

use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};
use std::io::IsTerminal;

use crate::models::BookResult;

/// Widest title shown in a results table before truncation.
const MAX_TITLE_WIDTH: usize = 60;
const MAX_AUTHOR_WIDTH: usize = 40;

/// Get the current terminal width.
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(100)
}

/// Check if stdout is a terminal.
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Info,
    Download,
    Search,
}

/// Status icons for different operations.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Error => "✗",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
        Status::Download => "↓",
        Status::Search => "🔍",
    }
}

/// Build the 1-indexed results table (#, Title, Author, Format, Source).
pub fn results_table(results: &[BookResult]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(terminal_width().min(u16::MAX as usize) as u16)
        .set_header(vec![
            Cell::new("#").add_attribute(Attribute::Dim),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Author").add_attribute(Attribute::Bold),
            Cell::new("Format").add_attribute(Attribute::Bold),
            Cell::new("Source").add_attribute(Attribute::Bold),
        ]);

    for (idx, result) in results.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1).add_attribute(Attribute::Dim),
            Cell::new(truncate_with_ellipsis(result.title(), MAX_TITLE_WIDTH)),
            Cell::new(truncate_with_ellipsis(result.author(), MAX_AUTHOR_WIDTH)),
            Cell::new(result.format().label()),
            Cell::new(result.source().name()),
        ]);
    }

    table
}

/// Truncate text to fit within the specified width using unicode-aware truncation.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width <= 3 {
        return "...".to_string();
    }

    let char_widths: Vec<(char, usize)> = text
        .chars()
        .map(|c| (c, unicode_width::UnicodeWidthChar::width(c).unwrap_or(1)))
        .collect();

    let total_width: usize = char_widths.iter().map(|(_, w)| *w).sum();
    if total_width <= max_width {
        return text.to_string();
    }

    // Longest prefix that leaves room for the ellipsis
    let mut current_width = 0;
    let mut end_idx = 0;
    for (i, (_, w)) in char_widths.iter().enumerate() {
        if current_width + w > max_width - 3 {
            break;
        }
        current_width += w;
        end_idx = i + 1;
    }

    let truncated: String = char_widths[..end_idx].iter().map(|(c, _)| *c).collect();
    format!("{}...", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::mock::make_book;

    #[test]
    fn test_status_icon() {
        assert_eq!(status_icon(Status::Success), "✓");
        assert_eq!(status_icon(Status::Error), "✗");
        assert_eq!(status_icon(Status::Search), "🔍");
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("Hello", 10), "Hello");
        assert_eq!(truncate_with_ellipsis("Hello World", 8), "Hello...");
        assert_eq!(truncate_with_ellipsis("", 10), "");
        assert_eq!(truncate_with_ellipsis("Hello", 3), "...");
        // Wide characters count double
        assert_eq!(truncate_with_ellipsis("日本語の本です", 9), "日本語...");
    }

    #[test]
    fn test_results_table_rows() {
        let results = vec![
            make_book("Emma", "https://x/emma.pdf", "OpenLibrary"),
            make_book("Persuasion", "https://x/p.epub", "Project Gutenberg"),
        ];

        let rendered = results_table(&results).to_string();
        assert!(rendered.contains("Emma"));
        assert!(rendered.contains("EPUB"));
        assert!(rendered.contains("Project Gutenberg"));
        assert_eq!(results_table(&results).row_iter().count(), 2);
    }
}
