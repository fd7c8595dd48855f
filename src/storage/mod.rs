// src/storage/mod.rs
pub mod csv;

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use serde::Serialize;

use crate::batch::SkippedDocument;
use crate::records::Tabular;
use crate::utils::error::StorageError;

const FILE_STAMP_FORMAT: &str = "%Y_%m_%d-%I_%M_%S_%p";

/// What one run produced, written next to its CSV.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub kind: String,
    pub extracted: usize,
    pub skipped: Vec<SkippedDocument>,
    pub rating_error_rows: usize,
    pub timestamp: String,
}

impl RunSummary {
    pub fn new(kind: &str, extracted: usize, skipped: Vec<SkippedDocument>, rating_error_rows: usize) -> Self {
        Self {
            kind: kind.to_string(),
            extracted,
            skipped,
            rating_error_rows,
            timestamp: Local::now().to_rfc3339(),
        }
    }
}

/// `<prefix>-<YYYY_MM_DD-HH_MM_SS_AM>`
pub fn stamped_name(prefix: &str, at: NaiveDateTime) -> String {
    format!("{}-{}", prefix, at.format(FILE_STAMP_FORMAT))
}

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager writing into `base_dir`, creating it if needed.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Writes `records` as `<prefix>-<stamp>.csv`: a header row of field
    /// names, then one row per record.
    pub fn save_records<T: Tabular>(&self, prefix: &str, records: &[T]) -> Result<PathBuf, StorageError> {
        let file_name = format!("{}.csv", stamped_name(prefix, Local::now().naive_local()));
        let file_path = self.base_dir.join(file_name);
        self.write_records(&file_path, records)?;

        tracing::info!("Saved {} records to {}", records.len(), file_path.display());
        Ok(file_path)
    }

    fn write_records<T: Tabular>(&self, file_path: &Path, records: &[T]) -> Result<(), StorageError> {
        let file = fs::File::create(file_path).map_err(StorageError::IoError)?;
        let mut writer = BufWriter::new(file);

        let headers: Vec<String> = T::headers().into_iter().map(String::from).collect();
        csv::write_row(&mut writer, &headers)?;
        for record in records {
            csv::write_row(&mut writer, &record.to_row())?;
        }
        writer.flush().map_err(StorageError::IoError)
    }

    /// Writes the run summary as pretty JSON, `<prefix>-<stamp>-summary.json`.
    pub fn save_summary(&self, prefix: &str, summary: &RunSummary) -> Result<PathBuf, StorageError> {
        let file_name = format!("{}-summary.json", stamped_name(prefix, Local::now().naive_local()));
        let file_path = self.base_dir.join(file_name);

        let summary_str = serde_json::to_string_pretty(summary)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, summary_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved run summary to {}", file_path.display());
        Ok(file_path)
    }
}
