//! Bulk deal CSV parsing.
//!
//! Headers are matched loosely (case, whitespace and punctuation are ignored)
//! against the canonical schema. Rows that cannot be turned into a
//! `TradeRecord` are dropped and reported; they never abort the load.

use chrono::{NaiveDate, NaiveDateTime};
use common::error::{DealError, RecordIssue};
use common::models::{Quantity, Side, TradeDate, TradeRecord};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

const DATE_FORMATS: &[&str] = &[
    "%d-%b-%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d %b %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%d-%b-%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Date,
    Symbol,
    SecurityName,
    ClientName,
    BuySell,
    Quantity,
    Price,
    Remarks,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::Date,
        Column::Symbol,
        Column::SecurityName,
        Column::ClientName,
        Column::BuySell,
        Column::Quantity,
        Column::Price,
        Column::Remarks,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Symbol => "Symbol",
            Self::SecurityName => "SecurityName",
            Self::ClientName => "ClientName",
            Self::BuySell => "BuySell",
            Self::Quantity => "Quantity",
            Self::Price => "Price",
            Self::Remarks => "Remarks",
        }
    }

    fn keys(&self) -> &'static [&'static str] {
        match self {
            Self::Date => &["date"],
            Self::Symbol => &["symbol"],
            Self::SecurityName => &["securityname"],
            Self::ClientName => &["clientname"],
            Self::BuySell => &["buysell"],
            Self::Quantity => &["quantitytraded", "quantity"],
            Self::Price => &["tradepricewghtavgprice", "price"],
            Self::Remarks => &["remarks"],
        }
    }

    fn required(&self) -> bool {
        matches!(self, Self::Date | Self::Symbol | Self::BuySell | Self::Quantity)
    }
}

/// Lowercase alphanumerics only: `" Buy / Sell "` becomes `"buysell"`.
pub fn header_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Position of each canonical column in the input header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    positions: [Option<usize>; 8],
}

impl ColumnMap {
    pub fn resolve(headers: &StringRecord) -> Result<Self, DealError> {
        let keys: Vec<String> = headers.iter().map(header_key).collect();
        let mut positions = [None; 8];

        for (slot, column) in positions.iter_mut().zip(Column::ALL) {
            *slot = column
                .keys()
                .iter()
                .find_map(|wanted| keys.iter().position(|k| k == wanted));
        }

        let missing: Vec<&'static str> = Column::ALL
            .iter()
            .zip(positions.iter())
            .filter(|(column, pos)| column.required() && pos.is_none())
            .map(|(column, _)| column.name())
            .collect();

        if !missing.is_empty() {
            return Err(DealError::SchemaMismatch(missing));
        }
        Ok(Self { positions })
    }

    pub fn position(&self, column: Column) -> Option<usize> {
        let idx = Column::ALL.iter().position(|c| *c == column)?;
        self.positions[idx]
    }

    fn field<'r>(&self, row: &'r StringRecord, column: Column) -> &'r str {
        self.position(column)
            .and_then(|pos| row.get(pos))
            .map(str::trim)
            .unwrap_or("")
    }

    pub fn to_record(&self, row: &StringRecord, line: usize) -> Result<TradeRecord, RecordIssue> {
        let malformed = |field: &'static str, value: &str| RecordIssue::MalformedRecord {
            line,
            field,
            value: value.to_string(),
        };

        let raw_date = self.field(row, Column::Date);
        if raw_date.is_empty() {
            return Err(malformed("Date", raw_date));
        }
        let date = match parse_trade_date(raw_date) {
            Some(date) => TradeDate::Parsed(date),
            None => {
                debug!("Line {}: keeping unrecognised date {:?} as text", line, raw_date);
                TradeDate::Raw(raw_date.to_string())
            }
        };

        let symbol = self.field(row, Column::Symbol);
        if symbol.is_empty() {
            return Err(malformed("Symbol", symbol));
        }

        let raw_side = self.field(row, Column::BuySell);
        let side = Side::parse(raw_side).ok_or_else(|| RecordIssue::UnrecognizedSide {
            line,
            value: raw_side.to_string(),
        })?;

        let raw_qty = self.field(row, Column::Quantity);
        let quantity = parse_quantity(raw_qty).ok_or_else(|| malformed("Quantity", raw_qty))?;

        let raw_price = self.field(row, Column::Price);
        let price = parse_price(raw_price);
        if price.is_none() && !raw_price.is_empty() {
            debug!("Line {}: ignoring unparseable price {:?}", line, raw_price);
        }

        Ok(TradeRecord {
            date,
            symbol: symbol.to_string(),
            security_name: self.field(row, Column::SecurityName).to_string(),
            client_name: self.field(row, Column::ClientName).to_string(),
            side,
            quantity,
            price,
            remarks: self.field(row, Column::Remarks).to_string(),
        })
    }
}

/// Strips thousands separators. Anything else that is not a plain
/// non-negative integer, or does not fit a signed 64-bit quantity, is
/// rejected.
pub fn parse_quantity(raw: &str) -> Option<Quantity> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<u64>().ok().and_then(Quantity::new)
}

pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|p| p.is_finite())
}

pub fn parse_trade_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub records: Vec<TradeRecord>,
    pub issues: Vec<RecordIssue>,
}

impl LoadReport {
    pub fn rows_read(&self) -> usize {
        self.records.len() + self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub fn parse_deals(bytes: &[u8]) -> Result<LoadReport, DealError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| DealError::Csv(e.to_string()))?
        .clone();
    let columns = ColumnMap::resolve(&headers)?;

    let mut report = LoadReport::default();
    for (idx, row) in reader.records().enumerate() {
        let line = idx + 2;
        let result = match row {
            Ok(row) => {
                let line = row.position().map(|p| p.line() as usize).unwrap_or(line);
                columns.to_record(&row, line)
            }
            Err(e) => Err(RecordIssue::MalformedRecord {
                line,
                field: "Row",
                value: e.to_string(),
            }),
        };

        match result {
            Ok(record) => report.records.push(record),
            Err(issue) => {
                warn!("Skipping row: {}", issue);
                report.issues.push(issue);
            }
        }
    }

    debug!(
        "Parsed {} rows: {} kept, {} skipped",
        report.rows_read(),
        report.records.len(),
        report.issues.len()
    );
    Ok(report)
}
