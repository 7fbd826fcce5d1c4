use common::models::SecuritySummary;
use csv::{ReaderBuilder, WriterBuilder};
use rust_xlsxwriter::{Format, Workbook};
use thiserror::Error;

pub const SHEET_NAME: &str = "Report";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV buffer flush failed: {0}")]
    Flush(String),
    #[error("XLSX export failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// UTF-8 CSV with a header row and no index column. The header is written
/// even when the view is empty.
pub fn to_csv_bytes(rows: &[SecuritySummary]) -> Result<Vec<u8>, ExportError> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(Vec::new());

    if rows.is_empty() {
        writer.write_record(SecuritySummary::COLUMNS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.to_string()))
}

pub fn from_csv_bytes(bytes: &[u8]) -> Result<Vec<SecuritySummary>, ExportError> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(bytes);
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: SecuritySummary = result?;
        rows.push(row);
    }
    Ok(rows)
}

/// Single `Report` sheet, bold header row, numeric columns stored as numbers.
pub fn to_xlsx_bytes(rows: &[SecuritySummary]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, name) in SecuritySummary::COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let r = (idx + 1) as u32;
        sheet.write_string(r, 0, row.symbol.as_str())?;
        sheet.write_number(r, 1, row.net_accumulation_qty as f64)?;
        sheet.write_number(r, 2, row.buy_days)?;
        sheet.write_number(r, 3, row.sell_days)?;
        sheet.write_string(r, 4, row.market_bias.as_str())?;
        sheet.write_number(r, 5, row.probability_score)?;
    }

    Ok(workbook.save_to_buffer()?)
}

pub fn to_json_bytes(rows: &[SecuritySummary]) -> Result<Vec<u8>, ExportError> {
    Ok(serde_json::to_vec_pretty(rows)?)
}
