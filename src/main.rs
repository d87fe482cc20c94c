use anyhow::{Context, Result};
use book_fetcher::config::{expand_home, find_config_file, load_config, save_config, Config};
use book_fetcher::models::{BookResult, SearchQuery};
use book_fetcher::pipeline::{self, RunOutcome};
use book_fetcher::sources::{SourceRegistry, BUILTIN_SOURCE_IDS};
use book_fetcher::ui::{results_table, Reporter, Status, TerminalReporter};
use book_fetcher::utils::{Downloader, HttpClient};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Book Fetcher - find free PDF/EPUB editions of a book and download one
#[derive(Parser, Debug)]
#[command(name = "book-fetcher")]
#[command(version = book_fetcher::VERSION)]
#[command(about = "Search OpenLibrary, Project Gutenberg and Google Books for a book and download it", long_about = None)]
struct Cli {
    /// Book title (prompted for when omitted)
    #[arg(long, short)]
    title: Option<String>,

    /// Author name (prompted for when omitted)
    #[arg(long, short)]
    author: Option<String>,

    /// Directory to save downloads in (default: ~/Desktop/book_fetcher)
    #[arg(long, short = 'd')]
    output_dir: Option<PathBuf>,

    /// Only query these catalogs (repeatable, default: all)
    #[arg(long = "source", short, value_enum)]
    sources: Vec<SourceId>,

    /// Print the results and exit without prompting or downloading
    #[arg(long)]
    list_only: bool,

    /// Output format for --list-only
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective configuration to PATH and exit
    #[arg(long, value_name = "PATH")]
    init_config: Option<PathBuf>,

    /// Enable verbose logging (-v debug, -vv trace)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(long, short)]
    quiet: bool,
}

/// Output format for listed results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text with download links
    Plain,
}

/// Available catalogs
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SourceId {
    #[value(name = "openlibrary")]
    OpenLibrary,
    #[value(name = "gutenberg")]
    Gutenberg,
    #[value(name = "google_books")]
    GoogleBooks,
}

impl SourceId {
    fn id(self) -> &'static str {
        match self {
            SourceId::OpenLibrary => "openlibrary",
            SourceId::Gutenberg => "gutenberg",
            SourceId::GoogleBooks => "google_books",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from file if specified or found in default locations
    let config_path = cli.config.clone().or_else(find_config_file);
    let mut config = load_config(config_path.as_deref()).with_context(|| match &config_path {
        Some(path) => format!("Failed to load config file {}", path.display()),
        None => "Failed to load configuration from environment".to_string(),
    })?;

    init_tracing(&cli, &config);
    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    apply_overrides(&cli, &mut config);

    if let Some(path) = &cli.init_config {
        save_config(&config, path)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        println!("Wrote configuration to {}", path.display());
        return Ok(());
    }

    let client = HttpClient::from_config(&config.http).context("Failed to create HTTP client")?;
    let registry = SourceRegistry::from_config(&client, &config.sources);
    if registry.is_empty() {
        anyhow::bail!(
            "No sources enabled; choose from {}",
            BUILTIN_SOURCE_IDS.join(", ")
        );
    }

    let mut reporter = TerminalReporter::new();

    let title = match cli.title.clone() {
        Some(title) => title,
        None => reporter.prompt("Enter book title: ").unwrap_or_default(),
    };
    let author = match cli.author.clone() {
        Some(author) => author,
        None => reporter.prompt("Enter author name: ").unwrap_or_default(),
    };

    let query = SearchQuery::new(title, author);
    if !query.is_complete() {
        reporter.notice(Status::Error, "Both book name and author name are required.");
        return Ok(());
    }

    if cli.list_only {
        let results = pipeline::search_all(&registry, &query, &mut reporter).await;
        if results.is_empty() {
            reporter.notice(Status::Warning, "No books found for your query.");
        } else {
            output_results(&results, cli.output)?;
        }
        return Ok(());
    }

    let downloader = Downloader::from_config(client, &config.downloads);
    match pipeline::run(&registry, &downloader, &query, &mut reporter).await {
        RunOutcome::Downloaded(book) => tracing::debug!(title = book.title(), "Done"),
        RunOutcome::DownloadFailed(book) => tracing::debug!(title = book.title(), "Download failed"),
        RunOutcome::Cancelled => tracing::debug!("Selection cancelled"),
        RunOutcome::NoResults => tracing::debug!("Nothing to download"),
    }

    Ok(())
}

/// Initialize tracing based on verbosity, `RUST_LOG` and the logging config
fn init_tracing(cli: &Cli, config: &Config) {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => config.logging.level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("book_fetcher={}", level)),
    );

    let fmt_layer = if config.logging.format.as_deref() == Some("json") {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Fold command line overrides into the loaded configuration
fn apply_overrides(cli: &Cli, config: &mut Config) {
    if let Some(dir) = &cli.output_dir {
        config.downloads.output_dir = expand_home(dir);
    }

    if !cli.sources.is_empty() {
        config.sources.enabled = Some(cli.sources.iter().map(|s| s.id().to_string()).collect());
    }
}

fn output_results(results: &[BookResult], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(results)?);
        }
        OutputFormat::Plain => {
            for (idx, book) in results.iter().enumerate() {
                println!("{}. {} by {}", idx + 1, book.title(), book.author());
                println!("   {} from {}: {}", book.format(), book.source(), book.download_url());
                println!();
            }
        }
        OutputFormat::Table => {
            println!("{}", results_table(results));
        }
    }

    Ok(())
}
