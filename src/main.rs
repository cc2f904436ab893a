// src/main.rs
mod corpus;
mod extractors;
mod pipeline;
mod storage;
mod utils;

use clap::Parser;
use corpus::{walker, Article};
use extractors::SectionTables;
use std::fs;
use std::path::PathBuf;
use storage::{CsvWriter, RunSummary};
use utils::AppError;

/// Command Line Interface for the p-value corpus miner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Root directory of the article corpus; all subfolders are searched
    #[arg(short, long)]
    input_dir: PathBuf,

    /// Output CSV path
    #[arg(short, long, default_value = "p_values.csv")]
    output: PathBuf,

    /// Document file extension to process
    #[arg(long, default_value = "nxml")]
    extension: String,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting corpus run with args: {:?}", args);

    // 3. Curated section-recognition tables, shared across the run
    let tables = SectionTables::curated();

    // 4. Discover the input documents
    let files = walker::find_documents(&args.input_dir, &args.extension)?;
    tracing::info!("Found {} .{} documents under {}", files.len(), args.extension, args.input_dir.display());

    if files.is_empty() {
        return Err(AppError::Config(format!(
            "No .{} documents found under {}",
            args.extension,
            args.input_dir.display()
        )));
    }

    // 5. Open the output destination; failure here is fatal
    let mut writer = CsvWriter::create(&args.output)?;

    // 6. Process each document sequentially. A single document's anomaly must
    //    never abort the batch: unreadable or unparsable files are skipped
    //    with a diagnostic.
    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut rows_written = 0usize;

    for path in &files {
        let xml = match fs::read_to_string(path) {
            Ok(xml) => xml,
            Err(e) => {
                tracing::warn!("Skipping unreadable file {}: {}", path.display(), e);
                skipped += 1;
                continue;
            }
        };

        let article = match Article::parse(&xml) {
            Ok(article) => article,
            Err(e) => {
                tracing::warn!("Skipping unparsable document {}: {}", path.display(), e);
                skipped += 1;
                continue;
            }
        };

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let folder_name = path
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let report = pipeline::process_document(&article, &file_name, &folder_name, &tables);
        rows_written += writer.write_report(&report)?;

        processed += 1;
        if processed % 100 == 0 {
            tracing::info!("done {} papers", processed);
        }
    }

    // 7. Flush the CSV and record the run metadata
    let summary = RunSummary {
        documents_processed: processed,
        documents_skipped: skipped,
        rows_written,
        finished_at: chrono::Utc::now().to_rfc3339(),
    };
    writer.finish(&summary)?;

    tracing::info!(
        "Run finished. Processed: {}, skipped: {}, rows written: {}",
        processed,
        skipped,
        rows_written
    );

    Ok(())
}
