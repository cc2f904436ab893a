// src/storage/mod.rs
use crate::pipeline::{DocumentReport, OUTPUT_HEADER};
use crate::utils::error::StorageError;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Counters reported at the end of a run, written next to the CSV as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub documents_processed: usize,
    pub documents_skipped: usize,
    pub rows_written: usize,
    pub finished_at: String,
}

/// Owns the output CSV for the duration of one run. The header goes out at
/// creation time, so a run that processes zero documents still leaves a
/// well-formed file. Dropping the writer closes the file on every exit path.
pub struct CsvWriter {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl CsvWriter {
    /// Creates (truncating) the output file and writes the column header.
    pub fn create(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", OUTPUT_HEADER.join(","))?;

        tracing::debug!("Opened output file {}", path.display());
        Ok(Self { writer, path: path.to_path_buf() })
    }

    /// Appends every row of one document's report. Returns the row count.
    pub fn write_report(&mut self, report: &DocumentReport) -> Result<usize, StorageError> {
        let rows = report.to_rows();
        for row in &rows {
            writeln!(self.writer, "{}", row.join(","))?;
        }
        Ok(rows.len())
    }

    /// Flushes the CSV and writes the run metadata JSON alongside it.
    pub fn finish(mut self, summary: &RunSummary) -> Result<PathBuf, StorageError> {
        self.writer.flush()?;

        let meta_path = self.path.with_extension("meta.json");
        let body = serde_json::to_string_pretty(summary)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&meta_path, body)?;

        tracing::info!("Saved run metadata to {}", meta_path.display());
        Ok(meta_path)
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Article;
    use crate::extractors::SectionTables;
    use crate::pipeline::process_document;

    #[test]
    fn header_rows_and_metadata_round_trip() {
        let dir = std::env::temp_dir().join("pval_extractor_storage_test");
        fs::create_dir_all(&dir).unwrap();
        let out = dir.join("p_values.csv");

        let xml = r#"<article>
            <front><abstract><p>Clear effect (p=0.02) here.</p></abstract></front>
        </article>"#;
        let article = Article::parse(xml).unwrap();
        let report = process_document(&article, "a.nxml", "J", &SectionTables::curated());

        let mut writer = CsvWriter::create(&out).unwrap();
        let n = writer.write_report(&report).unwrap();
        assert_eq!(n, 1);
        let meta_path = writer
            .finish(&RunSummary {
                documents_processed: 1,
                documents_skipped: 0,
                rows_written: n,
                finished_at: chrono::Utc::now().to_rfc3339(),
            })
            .unwrap();

        let csv = fs::read_to_string(&out).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), OUTPUT_HEADER.join(","));
        let row = lines.next().unwrap();
        assert!(row.starts_with("0.02,=,2,abstract,"));
        assert!(lines.next().is_none());

        let meta = fs::read_to_string(&meta_path).unwrap();
        assert!(meta.contains("\"rows_written\": 1"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
