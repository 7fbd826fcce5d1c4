//! Dashboard configuration from environment variables
//!
//! Environment variables (a `.env` file is honoured):
//! - `DEALS_URL` remote CSV, empty disables the remote source
//! - `DEALS_LOCAL_PATH` fallback CSV (default: bulk_deals.csv)
//! - `DEALS_HTTP_TIMEOUT_SECS` (default: 10)
//! - `REPORT_OUTPUT_DIR` where the CSV/XLSX reports land (default: .)
//! - `MIN_BUY_DAYS` (default: 1)
//! - `NET_BUYERS_ONLY` (default: true)
//! - `SYMBOL_SEARCH` (default: empty)
//! - `VIEW_SIZE` 10, 20 or all (default: all)
//! - `CHART_TOP_N` (default: 10, clamped to 5..=30)
//! - `REPORT_JSON` print the view as JSON instead of the table (default: false)

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use market_data::remote::{DEFAULT_DEALS_URL, DEFAULT_LOCAL_PATH};
use strategy::view::{CHART_DEFAULT_BARS, CHART_MAX_BARS, CHART_MIN_BARS};
use strategy::{ViewFilter, ViewSize};
use tracing::warn;

use crate::services::session::SourceSpec;

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub source: SourceSpec,
    pub output_dir: PathBuf,
    pub filter: ViewFilter,
    pub view_size: ViewSize,
    pub chart_top_n: usize,
    pub json: bool,
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let remote_url = match lookup("DEALS_URL") {
            Some(url) if url.trim().is_empty() => None,
            Some(url) => Some(url.trim().to_string()),
            None => Some(DEFAULT_DEALS_URL.to_string()),
        };

        let defaults = ViewFilter::default();

        Self {
            source: SourceSpec {
                remote_url,
                local_path: lookup("DEALS_LOCAL_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_LOCAL_PATH)),
                timeout: Duration::from_secs(parse_or(&lookup, "DEALS_HTTP_TIMEOUT_SECS", 10)),
            },
            output_dir: lookup("REPORT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            filter: ViewFilter {
                min_buy_days: parse_or(&lookup, "MIN_BUY_DAYS", defaults.min_buy_days),
                net_buyers_only: parse_or(&lookup, "NET_BUYERS_ONLY", defaults.net_buyers_only),
                search: lookup("SYMBOL_SEARCH").unwrap_or_default(),
            },
            view_size: parse_or(&lookup, "VIEW_SIZE", ViewSize::All),
            chart_top_n: parse_or(&lookup, "CHART_TOP_N", CHART_DEFAULT_BARS)
                .clamp(CHART_MIN_BARS, CHART_MAX_BARS),
            json: parse_or(&lookup, "REPORT_JSON", false),
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(v) => v,
            Err(e) => {
                warn!("Ignoring {}={:?}: {}", key, raw, e);
                default
            }
        },
        None => default,
    }
}
