use std::fs;
use std::path::{Path, PathBuf};

use common::models::SecuritySummary;
use tracing::info;

use crate::export::{ExportError, to_csv_bytes, to_xlsx_bytes};

pub const CSV_FILE_NAME: &str = "bulk_deal_report.csv";
pub const XLSX_FILE_NAME: &str = "bulk_deal_report.xlsx";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReport {
    pub csv_path: PathBuf,
    pub xlsx_path: PathBuf,
    pub rows: usize,
}

pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes both report files, replacing earlier ones.
    pub fn write(&self, rows: &[SecuritySummary]) -> Result<WrittenReport, ExportError> {
        fs::create_dir_all(&self.output_dir)?;

        let csv_path = self.output_dir.join(CSV_FILE_NAME);
        fs::write(&csv_path, to_csv_bytes(rows)?)?;

        let xlsx_path = self.output_dir.join(XLSX_FILE_NAME);
        fs::write(&xlsx_path, to_xlsx_bytes(rows)?)?;

        info!(
            "Wrote {} rows to {} and {}",
            rows.len(),
            csv_path.display(),
            xlsx_path.display()
        );

        Ok(WrittenReport {
            csv_path,
            xlsx_path,
            rows: rows.len(),
        })
    }
}
