use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketBias {
    Accumulation,
    Distribution,
    Neutral,
}

impl MarketBias {
    pub fn from_days(buy_days: u32, sell_days: u32) -> Self {
        if buy_days > sell_days {
            Self::Accumulation
        } else if sell_days > buy_days {
            Self::Distribution
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accumulation => "Accumulation",
            Self::Distribution => "Distribution",
            Self::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for MarketBias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row per symbol. Field names on the wire match the report columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecuritySummary {
    #[serde(rename = "Symbol")]
    pub symbol: String,
    #[serde(rename = "Net_Accumulation_Qty")]
    pub net_accumulation_qty: i64,
    #[serde(rename = "Buy_Days")]
    pub buy_days: u32,
    #[serde(rename = "Sell_Days")]
    pub sell_days: u32,
    #[serde(rename = "Market_Bias")]
    pub market_bias: MarketBias,
    #[serde(rename = "Probability_Score")]
    pub probability_score: f64,
}

impl SecuritySummary {
    pub const COLUMNS: [&'static str; 6] = [
        "Symbol",
        "Net_Accumulation_Qty",
        "Buy_Days",
        "Sell_Days",
        "Market_Bias",
        "Probability_Score",
    ];

    /// Unscored row; the scorer fills `probability_score` later.
    pub fn new(symbol: String, net_accumulation_qty: i64, buy_days: u32, sell_days: u32) -> Self {
        Self {
            symbol,
            net_accumulation_qty,
            buy_days,
            sell_days,
            market_bias: MarketBias::from_days(buy_days, sell_days),
            probability_score: 0.0,
        }
    }

    pub fn with_score(&self, probability_score: f64) -> Self {
        Self {
            probability_score,
            ..self.clone()
        }
    }
}
