use common::models::{SecuritySummary, Side, SignedTrade};
use polars::prelude::*;
use tracing::debug;

const SYMBOL: &str = "symbol";
const DAY: &str = "day";
const SIDE: &str = "side";
const SIGNED_QTY: &str = "signed_qty";
const NET_QTY: &str = "net_accumulation_qty";
const BUY_DAYS: &str = "buy_days";
const SELL_DAYS: &str = "sell_days";

/// Columnar view of the signed trades: one row per trade.
pub fn trades_frame(trades: &[SignedTrade]) -> PolarsResult<DataFrame> {
    let symbols: Vec<&str> = trades.iter().map(|t| t.symbol()).collect();
    let days: Vec<String> = trades.iter().map(|t| t.date().key()).collect();
    let sides: Vec<&str> = trades.iter().map(|t| t.side().as_str()).collect();
    let signed: Vec<i64> = trades.iter().map(|t| t.signed_quantity).collect();

    df!(
        SYMBOL => symbols,
        DAY => days,
        SIDE => sides,
        SIGNED_QTY => signed,
    )
}

fn distinct_days(side: Side) -> Expr {
    col(DAY)
        .filter(col(SIDE).eq(lit(side.as_str())))
        .n_unique()
        .cast(DataType::Int64)
}

/// One unscored summary per symbol present in `trades`, ascending by symbol.
///
/// Net quantity is the sum of signed quantities; buy/sell days count
/// distinct trade dates per side, so several fills on one date count once.
/// Dates that could not be parsed are compared by their raw text.
pub fn aggregate(trades: &[SignedTrade]) -> PolarsResult<Vec<SecuritySummary>> {
    if trades.is_empty() {
        return Ok(Vec::new());
    }

    let grouped = trades_frame(trades)?
        .lazy()
        .group_by([col(SYMBOL)])
        .agg([
            col(SIGNED_QTY).sum().cast(DataType::Int64).alias(NET_QTY),
            distinct_days(Side::Buy).alias(BUY_DAYS),
            distinct_days(Side::Sell).alias(SELL_DAYS),
        ])
        .collect()?;

    let symbols = grouped.column(SYMBOL)?.str()?;
    let net = grouped.column(NET_QTY)?.i64()?;
    let buys = grouped.column(BUY_DAYS)?.i64()?;
    let sells = grouped.column(SELL_DAYS)?.i64()?;

    let mut rows: Vec<SecuritySummary> = symbols
        .into_iter()
        .zip(net)
        .zip(buys)
        .zip(sells)
        .filter_map(|(((symbol, net), buy), sell)| {
            Some(SecuritySummary::new(
                symbol?.to_string(),
                net.unwrap_or(0),
                day_count(buy),
                day_count(sell),
            ))
        })
        .collect();
    rows.sort_by(|a, b| a.symbol.cmp(&b.symbol));

    debug!("Aggregated {} trades into {} symbols", trades.len(), rows.len());
    Ok(rows)
}

fn day_count(value: Option<i64>) -> u32 {
    value.and_then(|v| u32::try_from(v).ok()).unwrap_or(0)
}
