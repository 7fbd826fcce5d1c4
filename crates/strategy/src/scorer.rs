//! Probability score for a security summary.
//!
//! score = clamp(qty + conviction + penalty, 0, 100), rounded to one decimal
//!
//! - qty: net quantity relative to the largest net accumulation, weighted 60.
//!   Zero when no symbol is a net buyer. May be negative.
//! - conviction: 10 per buy day in excess of sell days, capped to [0, 30].
//! - penalty: -5 per sell day, floored at -20.

use common::models::SecuritySummary;
use tracing::debug;

pub const QTY_WEIGHT: f64 = 60.0;
pub const CONVICTION_PER_DAY: i64 = 10;
pub const CONVICTION_CAP: i64 = 30;
pub const PENALTY_PER_SELL_DAY: i64 = 5;
pub const PENALTY_FLOOR: i64 = -20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub qty_score: f64,
    pub conviction_score: f64,
    pub distribution_penalty: f64,
    pub raw_score: f64,
    pub probability_score: f64,
}

pub fn qty_score(net_accumulation_qty: i64, max_net_accumulation_qty: i64) -> f64 {
    if max_net_accumulation_qty <= 0 {
        return 0.0;
    }
    (net_accumulation_qty as f64 / max_net_accumulation_qty as f64) * QTY_WEIGHT
}

pub fn conviction_score(buy_days: u32, sell_days: u32) -> f64 {
    let raw = (i64::from(buy_days) - i64::from(sell_days)) * CONVICTION_PER_DAY;
    raw.clamp(0, CONVICTION_CAP) as f64
}

pub fn distribution_penalty(sell_days: u32) -> f64 {
    let raw = -i64::from(sell_days) * PENALTY_PER_SELL_DAY;
    raw.clamp(PENALTY_FLOOR, 0) as f64
}

/// Rounds to one decimal place. Ties are decided on the exact binary value,
/// half to even, so 0.15 (stored as 0.1499…) becomes 0.1.
pub fn round_to_tenth(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

pub fn breakdown(row: &SecuritySummary, max_net_accumulation_qty: i64) -> ScoreBreakdown {
    let qty = qty_score(row.net_accumulation_qty, max_net_accumulation_qty);
    let conviction = conviction_score(row.buy_days, row.sell_days);
    let penalty = distribution_penalty(row.sell_days);
    let raw = qty + conviction + penalty;

    ScoreBreakdown {
        qty_score: qty,
        conviction_score: conviction,
        distribution_penalty: penalty,
        raw_score: raw,
        probability_score: round_to_tenth(raw.clamp(0.0, 100.0)),
    }
}

pub fn probability_score(row: &SecuritySummary, max_net_accumulation_qty: i64) -> f64 {
    breakdown(row, max_net_accumulation_qty).probability_score
}

/// Largest net accumulation in the table, 0 for an empty table.
pub fn max_net_accumulation(rows: &[SecuritySummary]) -> i64 {
    rows.iter()
        .map(|r| r.net_accumulation_qty)
        .max()
        .unwrap_or(0)
}

/// Scored summaries ordered by probability score, highest first. Rows with
/// equal scores keep the order they had before scoring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoredTable {
    rows: Vec<SecuritySummary>,
}

impl ScoredTable {
    pub fn rows(&self) -> &[SecuritySummary] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn max_buy_days(&self) -> u32 {
        self.rows.iter().map(|r| r.buy_days).max().unwrap_or(0)
    }

    pub fn get(&self, symbol: &str) -> Option<&SecuritySummary> {
        self.rows.iter().find(|r| r.symbol == symbol)
    }
}

pub fn score_table(rows: &[SecuritySummary]) -> ScoredTable {
    let max_qty = max_net_accumulation(rows);
    debug!("Scoring {} rows against max net qty {}", rows.len(), max_qty);

    let mut scored: Vec<SecuritySummary> = rows
        .iter()
        .map(|row| row.with_score(probability_score(row, max_qty)))
        .collect();
    scored.sort_by(|a, b| b.probability_score.total_cmp(&a.probability_score));

    ScoredTable { rows: scored }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(symbol: &str, net: i64, buy_days: u32, sell_days: u32) -> SecuritySummary {
        SecuritySummary::new(symbol.to_string(), net, buy_days, sell_days)
    }

    #[test]
    fn test_worked_example() {
        // net 120 of max 120, two buy days, one sell day
        let b = breakdown(&row("SYM", 120, 2, 1), 120);
        assert_eq!(b.qty_score, 60.0);
        assert_eq!(b.conviction_score, 10.0);
        assert_eq!(b.distribution_penalty, -5.0);
        assert_eq!(b.probability_score, 65.0);
    }

    #[test]
    fn test_zero_max_disables_qty_component() {
        assert_eq!(qty_score(0, 0), 0.0);
        assert_eq!(qty_score(-300, 0), 0.0);
        assert_eq!(qty_score(50, -10), 0.0);
        assert_eq!(probability_score(&row("FLAT", 0, 1, 0), 0), 10.0);
    }

    #[test]
    fn test_conviction_caps_at_thirty() {
        assert_eq!(conviction_score(5, 0), 30.0);
        assert_eq!(conviction_score(2, 0), 20.0);
        assert_eq!(conviction_score(0, 4), 0.0);
        assert_eq!(distribution_penalty(0), 0.0);
    }

    #[test]
    fn test_penalty_floors_at_minus_twenty() {
        assert_eq!(distribution_penalty(10), -20.0);
        assert_eq!(distribution_penalty(4), -20.0);
        assert_eq!(distribution_penalty(3), -15.0);
    }

    #[test]
    fn test_negative_qty_is_combined_before_clamping() {
        // -30 + 30 + 0: the qty term offsets conviction instead of being floored
        let b = breakdown(&row("NET_SELLER", -50, 3, 0), 100);
        assert_eq!(b.qty_score, -30.0);
        assert_eq!(b.raw_score, 0.0);
        assert_eq!(b.probability_score, 0.0);

        let b = breakdown(&row("NET_SELLER", -25, 3, 0), 100);
        assert_eq!(b.probability_score, 15.0);
    }

    #[test]
    fn test_composite_is_clamped_at_zero() {
        let b = breakdown(&row("DUMP", -100, 0, 4), 100);
        assert_eq!(b.raw_score, -80.0);
        assert_eq!(b.probability_score, 0.0);
    }

    #[test]
    fn test_top_accumulator_scores_ninety() {
        assert_eq!(probability_score(&row("TOP", 1_000, 5, 0), 1_000), 90.0);
    }

    #[test]
    fn test_rounds_to_one_decimal() {
        assert_eq!(probability_score(&row("A", 1, 0, 0), 7), 8.6);
        assert_eq!(probability_score(&row("B", 1, 0, 0), 3), 20.0);
        assert_eq!(round_to_tenth(12.34), 12.3);
        assert_eq!(round_to_tenth(12.36), 12.4);
        assert_eq!(round_to_tenth(0.15), 0.1);
    }

    #[test]
    fn test_scores_are_bounded_for_arbitrary_inputs() {
        let nets = [-1_000_000, -7, 0, 1, 13, 999_999];
        let maxes = [-5, 0, 1, 13, 1_000_000];
        for &net in &nets {
            for &max in &maxes {
                for buy in 0..8 {
                    for sell in 0..8 {
                        let s = probability_score(&row("X", net, buy, sell), max);
                        assert!((0.0..=100.0).contains(&s), "{s} out of range");
                        let tenths = s * 10.0;
                        assert!((tenths - tenths.round()).abs() < 1e-6, "{s} not rounded");
                    }
                }
            }
        }
    }

    #[test]
    fn test_score_table_sorts_descending_and_keeps_tie_order() {
        let rows = vec![
            row("AAA", 10, 1, 0),
            row("BBB", 100, 3, 0),
            row("CCC", 10, 1, 0),
            row("DDD", -10, 0, 2),
        ];

        let table = score_table(&rows);

        let symbols: Vec<&str> = table.rows().iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["BBB", "AAA", "CCC", "DDD"]);
        assert_eq!(table.get("BBB").unwrap().probability_score, 90.0);
        assert_eq!(table.max_buy_days(), 3);
    }

    #[test]
    fn test_empty_table_does_not_panic() {
        assert_eq!(max_net_accumulation(&[]), 0);
        let table = score_table(&[]);
        assert!(table.is_empty());
        assert_eq!(table.max_buy_days(), 0);
    }
}
