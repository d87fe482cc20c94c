//! Search request model.

use serde::{Deserialize, Serialize};

/// Search query parameters shared by every catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Book title as typed by the user
    pub title: String,

    /// Author name as typed by the user
    pub author: String,
}

impl SearchQuery {
    /// Create a new search query; surrounding whitespace is dropped
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into().trim().to_string(),
            author: author.into().trim().to_string(),
        }
    }

    /// Both title and author are required before any catalog is queried
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.author.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_trims_input() {
        let query = SearchQuery::new("  Emma ", "Jane Austen\n");
        assert_eq!(query.title, "Emma");
        assert_eq!(query.author, "Jane Austen");
        assert!(query.is_complete());
    }

    #[test]
    fn test_query_requires_both_fields() {
        assert!(!SearchQuery::new("Emma", "   ").is_complete());
        assert!(!SearchQuery::new("", "Jane Austen").is_complete());
    }
}
