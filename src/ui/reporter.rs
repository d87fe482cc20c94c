//! The reporter capability and its terminal implementation.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::io::{BufRead, Write};
use std::time::Duration;

use super::{is_terminal, results_table, status_icon, Status};
use crate::models::BookResult;

/// Everything the pipeline needs from a user interface.
///
/// Search lifecycle hooks default to no-ops so minimal reporters only deal
/// with tables, prompts, notices and download progress.
pub trait Reporter {
    /// Render the 1-indexed results listing
    fn show_table(&mut self, results: &[BookResult]);

    /// Ask for one line of input; `None` when input is exhausted
    fn prompt(&mut self, message: &str) -> Option<String>;

    /// Show a status line
    fn notice(&mut self, status: Status, message: &str);

    /// Download progress in percent for the file named `label`
    fn progress(&mut self, label: &str, percent: f64);

    /// The current download stopped reporting progress
    fn progress_done(&mut self) {}

    /// Sources are about to be queried, in this order
    fn search_started(&mut self, _sources: &[&str]) {}

    /// One source answered (failed sources report zero)
    fn source_finished(&mut self, _source: &str, _count: usize) {}

    /// All sources answered; `total` is the deduplicated count
    fn search_finished(&mut self, _total: usize) {}
}

/// Multi-source search spinner
struct SearchSpinner {
    bar: ProgressBar,
    targets: Vec<String>,
    completed: usize,
}

impl SearchSpinner {
    fn new(sources: &[&str]) -> Self {
        let bar = ProgressBar::new(sources.len() as u64);
        if let Ok(style) =
            ProgressStyle::with_template("{spinner:.cyan} {msg} {pos}/{len}")
        {
            bar.set_style(style.tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "));
        }
        bar.enable_steady_tick(Duration::from_millis(100));

        let targets: Vec<String> = sources.iter().map(|s| s.to_string()).collect();
        let spinner = Self {
            bar,
            targets,
            completed: 0,
        };
        spinner.refresh();
        spinner
    }

    fn complete(&mut self) {
        self.completed = (self.completed + 1).min(self.targets.len());
        self.bar.inc(1);
        self.refresh();
    }

    fn refresh(&self) {
        let parts: Vec<String> = self
            .targets
            .iter()
            .enumerate()
            .map(|(i, s)| {
                if i < self.completed {
                    format!("✓{}", s)
                } else {
                    format!("○{}", s)
                }
            })
            .collect();
        self.bar
            .set_message(format!("Searching for books [{}]", parts.join(" ")));
    }
}

/// Reporter that draws on the terminal: colored notices, a comfy-table
/// listing, an indicatif spinner while searching and a progress bar while
/// downloading. Prompts read lines from stdin.
pub struct TerminalReporter {
    colored: bool,
    spinner: Option<SearchSpinner>,
    download_bar: Option<ProgressBar>,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self {
            colored: is_terminal(),
            spinner: None,
            download_bar: None,
        }
    }

    fn styled(&self, status: Status, message: &str) -> String {
        let icon = status_icon(status);
        if !self.colored {
            return format!("{} {}", icon, message);
        }

        match status {
            Status::Success => format!("{} {}", icon.green().bold(), message.green()),
            Status::Error => format!("{} {}", icon.red().bold(), message.red()),
            Status::Warning => format!("{} {}", icon.yellow().bold(), message.yellow()),
            Status::Info => format!("{} {}", icon.cyan().bold(), message),
            Status::Download => format!("{} {}", icon.magenta(), message.bold()),
            Status::Search => format!("{} {}", icon.yellow(), message),
        }
    }

    /// Print a line without tearing an active spinner or progress bar
    fn print_line(&self, line: &str) {
        if let Some(spinner) = &self.spinner {
            spinner.bar.suspend(|| println!("{}", line));
        } else if let Some(bar) = &self.download_bar {
            bar.suspend(|| println!("{}", line));
        } else {
            println!("{}", line);
        }
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for TerminalReporter {
    fn show_table(&mut self, results: &[BookResult]) {
        println!("{}", results_table(results));
    }

    fn prompt(&mut self, message: &str) -> Option<String> {
        let message = if self.colored {
            message.bold().to_string()
        } else {
            message.to_string()
        };
        print!("{}", message);
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }

    fn notice(&mut self, status: Status, message: &str) {
        let line = self.styled(status, message);
        self.print_line(&line);
    }

    fn progress(&mut self, label: &str, percent: f64) {
        let bar = self.download_bar.get_or_insert_with(|| {
            let bar = ProgressBar::new(100);
            if let Ok(style) =
                ProgressStyle::with_template("{msg} {bar:40.cyan/blue}")
            {
                bar.set_style(style.progress_chars("█▓▒░ "));
            }
            bar
        });

        bar.set_position(percent.round() as u64);
        bar.set_message(format!("Downloading {}: {:.1}%", label, percent));
    }

    fn progress_done(&mut self) {
        if let Some(bar) = self.download_bar.take() {
            bar.finish();
        }
    }

    fn search_started(&mut self, sources: &[&str]) {
        self.spinner = Some(SearchSpinner::new(sources));
    }

    fn source_finished(&mut self, source: &str, count: usize) {
        let line = self.styled(
            Status::Info,
            &format!("Found {} books on {}.", count, source),
        );
        self.print_line(&line);

        if let Some(spinner) = self.spinner.as_mut() {
            spinner.complete();
        }
    }

    fn search_finished(&mut self, total: usize) {
        if let Some(spinner) = self.spinner.take() {
            spinner
                .bar
                .finish_with_message(format!("Found {} unique books", total));
        }
    }
}
