use std::fmt;
use std::str::FromStr;

use common::models::SecuritySummary;

use crate::scorer::ScoredTable;

pub const CHART_MIN_BARS: usize = 5;
pub const CHART_MAX_BARS: usize = 30;
pub const CHART_DEFAULT_BARS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewFilter {
    /// Inclusive.
    pub min_buy_days: u32,
    pub net_buyers_only: bool,
    /// Case-insensitive substring of the symbol. Blank matches everything.
    pub search: String,
}

impl Default for ViewFilter {
    fn default() -> Self {
        Self {
            min_buy_days: 1,
            net_buyers_only: true,
            search: String::new(),
        }
    }
}

impl ViewFilter {
    pub fn matches(&self, row: &SecuritySummary) -> bool {
        if self.net_buyers_only && row.net_accumulation_qty <= 0 {
            return false;
        }
        if row.buy_days < self.min_buy_days {
            return false;
        }
        let needle = self.search.trim();
        needle.is_empty() || row.symbol.to_lowercase().contains(&needle.to_lowercase())
    }

    /// Keeps matching rows in their incoming order.
    pub fn apply(&self, rows: &[SecuritySummary]) -> Vec<SecuritySummary> {
        rows.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewSize {
    Top10,
    Top20,
    #[default]
    All,
}

impl ViewSize {
    pub fn limit(&self) -> Option<usize> {
        match self {
            Self::Top10 => Some(10),
            Self::Top20 => Some(20),
            Self::All => None,
        }
    }
}

impl FromStr for ViewSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "10" | "top10" | "top 10" => Ok(Self::Top10),
            "20" | "top20" | "top 20" => Ok(Self::Top20),
            "all" | "" => Ok(Self::All),
            other => Err(format!("Unknown view size: {}", other)),
        }
    }
}

impl fmt::Display for ViewSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top10 => f.write_str("Top 10"),
            Self::Top20 => f.write_str("Top 20"),
            Self::All => f.write_str("All Stocks"),
        }
    }
}

/// Filter first, then truncate. The table's score order carries through.
pub fn build_view(table: &ScoredTable, filter: &ViewFilter, size: ViewSize) -> Vec<SecuritySummary> {
    let mut rows = filter.apply(table.rows());
    if let Some(limit) = size.limit() {
        rows.truncate(limit);
    }
    rows
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartBar {
    pub symbol: String,
    pub net_accumulation_qty: i64,
}

/// Leading `top_n` rows of the view, `top_n` clamped to the chart's range.
pub fn chart_series(view: &[SecuritySummary], top_n: usize) -> Vec<ChartBar> {
    let n = top_n.clamp(CHART_MIN_BARS, CHART_MAX_BARS);
    view.iter()
        .take(n)
        .map(|r| ChartBar {
            symbol: r.symbol.clone(),
            net_accumulation_qty: r.net_accumulation_qty,
        })
        .collect()
}
