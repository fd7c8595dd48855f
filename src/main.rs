// src/main.rs
mod archive;
mod batch;
mod config;
mod extractors;
mod fetch;
mod records;
mod storage;
mod utils;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use archive::{ArchivedDocument, PageKind};
use batch::{BatchOutcome, BatchParser};
use config::ScrapeConfig;
use extractors::{CareerExtractor, FightExtractor, ProfileExtractor, RatingsExtractor};
use fetch::Fetcher;
use records::Tabular;
use storage::{RunSummary, StorageManager};
use utils::AppError;

/// Which page kind a run extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    Fights,
    Profiles,
    Snippets,
    Ratings,
}

/// Command Line Interface for the BoxRec page extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Page kind to extract
    #[arg(short, long, value_enum)]
    kind: Kind,

    /// JSON config file with a top-level "config" object (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Archive directory to read pages from (overrides the config store)
    #[arg(short, long)]
    archive_dir: Option<PathBuf>,

    /// Output directory for CSV and summary files (overrides the config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Stop after this many documents
    #[arg(short, long)]
    limit: Option<usize>,

    /// Document keys to download into the archive before extracting
    #[arg(long, num_args = 1..)]
    fetch: Vec<String>,
}

/// Per-kind archive layout, store, site href and CSV prefix.
struct Target {
    page_kind: PageKind,
    store: PathBuf,
    href: String,
    csv_prefix: String,
}

impl Target {
    fn new(kind: Kind, config: &ScrapeConfig) -> Self {
        let (page_kind, store, href, csv_prefix) = match kind {
            Kind::Fights => (PageKind::Fight, &config.fights_store, &config.fights_href, &config.fights_csv_prefix),
            Kind::Profiles => (PageKind::Boxer, &config.profiles_store, &config.profiles_href, &config.profiles_csv_prefix),
            Kind::Snippets => (PageKind::Boxer, &config.profiles_store, &config.profiles_href, &config.fightsnips_csv_prefix),
            Kind::Ratings => (PageKind::Ratings, &config.ratings_store, &config.ratings_href, &config.ratings_csv_prefix),
        };
        Self {
            page_kind,
            store: store.clone(),
            href: href.clone(),
            csv_prefix: csv_prefix.clone(),
        }
    }
}

fn export<T: Tabular>(
    storage: &StorageManager,
    prefix: &str,
    kind: &str,
    outcome: BatchOutcome<T>,
    rating_error_rows: usize,
) -> Result<(), AppError> {
    match storage.save_records(prefix, &outcome.records) {
        Ok(path) => tracing::info!("Saved records to: {}", path.display()),
        Err(e) => tracing::error!("Failed to save records: {}", e),
    }
    let summary = RunSummary::new(kind, outcome.records.len(), outcome.skipped, rating_error_rows);
    storage.save_summary(prefix, &summary)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments and layer them over the config file
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    let mut config = match &args.config {
        Some(path) => ScrapeConfig::from_file(path)?,
        None => ScrapeConfig::default(),
    };
    if let Some(dir) = &args.output_dir {
        config.csv_folder = dir.clone();
    }
    if args.limit.is_some() {
        config.max_documents = args.limit;
    }

    let target = Target::new(args.kind, &config);
    let archive_dir = args.archive_dir.clone().unwrap_or_else(|| target.store.clone());

    // 3. Optionally populate the archive
    if !args.fetch.is_empty() {
        let fetcher = Fetcher::new(&config)?;
        let saved = fetcher
            .fetch_into_archive(&target.href, &args.fetch, target.page_kind, &archive_dir)
            .await?;
        tracing::info!("Fetched {} of {} pages into {}", saved.len(), args.fetch.len(), archive_dir.display());
    }

    // 4. Read the archive
    let documents = archive::load_documents(&archive_dir, target.page_kind)?;
    if documents.is_empty() {
        return Err(AppError::Config(format!(
            "No archived pages found in {}",
            archive_dir.display()
        )));
    }

    // 5. Extract and export
    let storage = StorageManager::new(&config.csv_folder)?;
    let prefix = target.csv_prefix.as_str();

    match args.kind {
        Kind::Fights => {
            let outcome = BatchParser::new(FightExtractor::new())
                .with_limit(config.max_documents)
                .parse(&documents);
            export(&storage, prefix, "fights", outcome, 0)?;
        }
        Kind::Profiles => {
            let first_pages: Vec<ArchivedDocument> = documents
                .into_iter()
                .filter(|doc| !doc.is_continuation_page())
                .collect();
            let outcome = BatchParser::new(ProfileExtractor::new())
                .with_limit(config.max_documents)
                .parse(&first_pages);
            export(&storage, prefix, "profiles", outcome, 0)?;
        }
        Kind::Snippets => {
            let outcome = BatchParser::new(CareerExtractor::new())
                .with_limit(config.max_documents)
                .parse(&documents)
                .flatten();
            export(&storage, prefix, "snippets", outcome, 0)?;
        }
        Kind::Ratings => {
            let (outcome, error_rows) = BatchParser::new(RatingsExtractor::new())
                .with_limit(config.max_documents)
                .parse(&documents)
                .into_rows();
            if !error_rows.is_empty() {
                tracing::warn!("{} ratings rows could not be coerced", error_rows.len());
            }
            export(&storage, prefix, "ratings", outcome, error_rows.len())?;
        }
    }

    tracing::info!("Processing finished.");
    Ok(())
}
