//! Interactive selection of one result.

use super::{Reporter, Status};
use crate::models::BookResult;

/// Prompt shown while waiting for a choice
pub const SELECT_PROMPT: &str = "Enter the number of the book to download (or 'q' to quit): ";

/// A valid answer to the selection prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The user gave up without choosing
    Quit,
    /// Zero-based index into the listing
    Index(usize),
}

/// Why an answer was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Please enter a valid number.")]
    NotANumber,

    #[error("Invalid number. Please try again.")]
    OutOfRange,
}

/// Interpret one line of input against a listing of `count` entries.
///
/// `q` / `quit` (any case) quits; `1..=count` selects.
pub fn parse_choice(input: &str, count: usize) -> Result<Selection, SelectionError> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
        return Ok(Selection::Quit);
    }

    let number: i64 = match input.parse() {
        Ok(n) => n,
        // Too large for i64 but still an integer
        Err(_) if is_integer(input) => return Err(SelectionError::OutOfRange),
        Err(_) => return Err(SelectionError::NotANumber),
    };
    match usize::try_from(number) {
        Ok(n) if (1..=count).contains(&n) => Ok(Selection::Index(n - 1)),
        _ => Err(SelectionError::OutOfRange),
    }
}

fn is_integer(input: &str) -> bool {
    let digits = input.strip_prefix(['+', '-']).unwrap_or(input);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Show `results` and block until the user picks one or quits.
///
/// An empty listing returns `None` straight away with a "No results found."
/// notice. Rejected answers are reported and the prompt repeats; running out
/// of input counts as quitting.
pub fn select_result(results: &[BookResult], reporter: &mut dyn Reporter) -> Option<BookResult> {
    if results.is_empty() {
        reporter.notice(Status::Warning, "No results found.");
        return None;
    }

    reporter.show_table(results);

    loop {
        let input = reporter.prompt(SELECT_PROMPT)?;

        match parse_choice(&input, results.len()) {
            Ok(Selection::Quit) => return None,
            Ok(Selection::Index(idx)) => return Some(results[idx].clone()),
            Err(e) => reporter.notice(Status::Error, &e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::mock::make_book;
    use crate::ui::RecordingReporter;

    fn two_books() -> Vec<BookResult> {
        vec![
            make_book("Emma", "https://x/emma.pdf", "OpenLibrary"),
            make_book("Persuasion", "https://x/persuasion.epub", "Project Gutenberg"),
        ]
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("1", 2), Ok(Selection::Index(0)));
        assert_eq!(parse_choice(" 2 \n", 2), Ok(Selection::Index(1)));
        assert_eq!(parse_choice("Q", 2), Ok(Selection::Quit));
        assert_eq!(parse_choice("quit", 2), Ok(Selection::Quit));
        assert_eq!(parse_choice("0", 2), Err(SelectionError::OutOfRange));
        assert_eq!(parse_choice("-1", 2), Err(SelectionError::OutOfRange));
        assert_eq!(parse_choice("3", 2), Err(SelectionError::OutOfRange));
        assert_eq!(parse_choice("abc", 2), Err(SelectionError::NotANumber));
        assert_eq!(parse_choice("1.5", 2), Err(SelectionError::NotANumber));
        assert_eq!(parse_choice("", 2), Err(SelectionError::NotANumber));
    }

    #[test]
    fn test_parse_choice_huge_integers() {
        assert_eq!(
            parse_choice("99999999999999999999", 2),
            Err(SelectionError::OutOfRange)
        );
        assert_eq!(
            parse_choice("-99999999999999999999", 2),
            Err(SelectionError::OutOfRange)
        );
        assert_eq!(parse_choice("+", 2), Err(SelectionError::NotANumber));
    }

    #[test]
    fn test_empty_results_skip_prompt() {
        let mut reporter = RecordingReporter::with_inputs(["1"]);

        assert_eq!(select_result(&[], &mut reporter), None);
        assert!(reporter.prompts.is_empty());
        assert!(reporter.tables.is_empty());
        assert_eq!(reporter.remaining_inputs(), 1);
        assert_eq!(reporter.notices_with(Status::Warning), vec!["No results found."]);
    }

    #[test]
    fn test_reprompts_until_valid() {
        let books = two_books();
        let mut reporter = RecordingReporter::with_inputs(["0", "-1", "abc", "2"]);

        let chosen = select_result(&books, &mut reporter).unwrap();

        assert_eq!(chosen.title(), "Persuasion");
        assert_eq!(reporter.prompts.len(), 4);
        assert_eq!(reporter.notices_with(Status::Error).len(), 3);
        assert_eq!(reporter.tables.len(), 1);
    }

    #[test]
    fn test_quit_token() {
        let books = two_books();
        let mut reporter = RecordingReporter::with_inputs(["x", "Q", "1"]);

        assert_eq!(select_result(&books, &mut reporter), None);
        assert_eq!(reporter.remaining_inputs(), 1);
    }

    #[test]
    fn test_end_of_input_quits() {
        let books = two_books();
        let mut reporter = RecordingReporter::with_inputs(["7"]);

        assert_eq!(select_result(&books, &mut reporter), None);
        assert_eq!(reporter.prompts.len(), 2);
    }
}
