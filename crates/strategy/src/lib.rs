pub mod aggregator;
pub mod scorer;
pub mod view;

use common::models::SignedTrade;
use polars::prelude::PolarsResult;

pub use aggregator::aggregate;
pub use scorer::{ScoreBreakdown, ScoredTable, score_table};
pub use view::{ChartBar, ViewFilter, ViewSize, build_view, chart_series};

/// Aggregate then score. An empty trade list gives an empty table.
pub fn build_report(trades: &[SignedTrade]) -> PolarsResult<ScoredTable> {
    let summaries = aggregate(trades)?;
    Ok(score_table(&summaries))
}
