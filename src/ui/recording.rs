//! Headless reporter for tests and scripted runs.

use std::collections::VecDeque;

use super::{Reporter, Status};
use crate::models::BookResult;

/// Reporter that feeds scripted input and records everything shown.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    inputs: VecDeque<String>,

    /// Prompt messages, one per prompt call
    pub prompts: Vec<String>,

    /// Every table shown
    pub tables: Vec<Vec<BookResult>>,

    /// Status notices in order
    pub notices: Vec<(Status, String)>,

    /// Progress percentages in order
    pub progress: Vec<f64>,

    /// Number of `progress_done` calls
    pub progress_finished: usize,

    /// `(source, count)` per finished source
    pub source_counts: Vec<(String, usize)>,

    /// Deduplicated totals reported at the end of each search
    pub search_totals: Vec<usize>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer prompts with these lines, in order
    pub fn with_inputs<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Scripted lines not consumed yet
    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Notices with the given status
    pub fn notices_with(&self, status: Status) -> Vec<&str> {
        self.notices
            .iter()
            .filter(|(s, _)| *s == status)
            .map(|(_, m)| m.as_str())
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn show_table(&mut self, results: &[BookResult]) {
        self.tables.push(results.to_vec());
    }

    fn prompt(&mut self, message: &str) -> Option<String> {
        self.prompts.push(message.to_string());
        self.inputs.pop_front()
    }

    fn notice(&mut self, status: Status, message: &str) {
        self.notices.push((status, message.to_string()));
    }

    fn progress(&mut self, _label: &str, percent: f64) {
        self.progress.push(percent);
    }

    fn progress_done(&mut self) {
        self.progress_finished += 1;
    }

    fn source_finished(&mut self, source: &str, count: usize) {
        self.source_counts.push((source.to_string(), count));
    }

    fn search_finished(&mut self, total: usize) {
        self.search_totals.push(total);
    }
}
