//! Filename derivation for downloaded books.

use crate::models::{BookFormat, UNKNOWN};

/// Strip every character that is not alphanumeric, a space, `-` or `_`, then
/// trailing whitespace.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// File name for a book: sanitized title plus the lowercase format extension.
///
/// Titles that sanitize to nothing are saved as `Unknown.<ext>`. Different
/// titles may map to the same name; the later download overwrites the file.
pub fn book_filename(title: &str, format: BookFormat) -> String {
    let stem = sanitize_title(title);
    let stem = if stem.is_empty() { UNKNOWN } else { stem.as_str() };
    format!("{}.{}", stem, format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_punctuation() {
        assert_eq!(book_filename("A/B: Test*", BookFormat::Pdf), "AB Test.pdf");
    }

    #[test]
    fn test_keeps_hyphen_underscore_and_unicode() {
        assert_eq!(sanitize_title("Les Misérables - Tome_1"), "Les Misérables - Tome_1");
    }

    #[test]
    fn test_trims_trailing_whitespace_only() {
        assert_eq!(sanitize_title("  Emma ?"), "  Emma");
    }

    #[test]
    fn test_empty_stem() {
        assert_eq!(book_filename("???", BookFormat::Epub), "Unknown.epub");
    }

    #[test]
    fn test_colliding_titles() {
        assert_eq!(
            book_filename("Emma!", BookFormat::Pdf),
            book_filename("Emma?", BookFormat::Pdf)
        );
    }
}
