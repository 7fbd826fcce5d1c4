pub mod chart;
pub mod table;

use strategy::{ViewFilter, ViewSize};

pub const DISCLAIMER: &str = "This is NOT investment advice. Data is for study & research only.";

/// One line describing the controls that produced the current view.
pub fn controls_line(filter: &ViewFilter, size: ViewSize, max_buy_days: u32) -> String {
    let search = match filter.search.trim() {
        "" => "-".to_string(),
        s => format!("{:?}", s),
    };
    format!(
        "Min buy days: {} (0..={}) | Net buyers only: {} | Search: {} | View: {}",
        filter.min_buy_days,
        max_buy_days,
        if filter.net_buyers_only { "yes" } else { "no" },
        search,
        size
    )
}
