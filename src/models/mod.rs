//! Core data models for book search results and queries.

mod book;
mod search;

pub use book::{BookFormat, BookResult, BookResultBuilder, SourceType, UNKNOWN};
pub use search::SearchQuery;
