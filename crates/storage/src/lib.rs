pub mod export;
pub mod report_writer;

pub use export::{ExportError, from_csv_bytes, to_csv_bytes, to_json_bytes, to_xlsx_bytes};
pub use report_writer::{CSV_FILE_NAME, ReportWriter, WrittenReport, XLSX_FILE_NAME};
