use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Trims and upper-cases `raw` before matching. Only the explicit
    /// aliases below map to a side; anything else yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "BUY" | "B" => Some(Self::Buy),
            "SELL" | "S" => Some(Self::Sell),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

/// Trade date as printed in the file. Rows whose date text matches none of
/// the known layouts keep the raw text, which still identifies the day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TradeDate {
    Parsed(NaiveDate),
    Raw(String),
}

impl TradeDate {
    pub fn parsed(&self) -> Option<NaiveDate> {
        match self {
            Self::Parsed(date) => Some(*date),
            Self::Raw(_) => None,
        }
    }

    /// Distinct-day key used when counting buy and sell days.
    pub fn key(&self) -> String {
        match self {
            Self::Parsed(date) => date.format("%Y-%m-%d").to_string(),
            Self::Raw(raw) => raw.clone(),
        }
    }
}

impl From<NaiveDate> for TradeDate {
    fn from(date: NaiveDate) -> Self {
        Self::Parsed(date)
    }
}

/// Traded share count, never above `i64::MAX` so it always has a signed
/// counterpart of the same magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Quantity(u64);

impl Quantity {
    pub const MAX: u64 = i64::MAX as u64;

    pub fn new(value: u64) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    pub fn signed(self, side: Side) -> i64 {
        // lossless: bounded by MAX
        let magnitude = self.0 as i64;
        match side {
            Side::Buy => magnitude,
            Side::Sell => -magnitude,
        }
    }
}

impl TryFrom<u64> for Quantity {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("quantity {} exceeds {}", value, Self::MAX))
    }
}

impl From<Quantity> for u64 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

/// One row of the bulk deal file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub date: TradeDate,
    pub symbol: String,
    pub security_name: String,
    pub client_name: String,
    pub side: Side,
    pub quantity: Quantity,
    pub price: Option<f64>,
    pub remarks: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignedTrade {
    pub record: TradeRecord,
    pub signed_quantity: i64,
}

impl From<TradeRecord> for SignedTrade {
    fn from(record: TradeRecord) -> Self {
        let signed_quantity = record.quantity.signed(record.side);
        Self {
            record,
            signed_quantity,
        }
    }
}

impl SignedTrade {
    pub fn symbol(&self) -> &str {
        &self.record.symbol
    }

    pub fn side(&self) -> Side {
        self.record.side
    }

    pub fn date(&self) -> &TradeDate {
        &self.record.date
    }
}

pub fn sign_all(records: impl IntoIterator<Item = TradeRecord>) -> Vec<SignedTrade> {
    records.into_iter().map(SignedTrade::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(side: Side, quantity: u64) -> TradeRecord {
        TradeRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().into(),
            symbol: "TATAPOWER".to_string(),
            security_name: "Tata Power Co Ltd".to_string(),
            client_name: "SOME FUND".to_string(),
            side,
            quantity: Quantity::new(quantity).unwrap(),
            price: Some(412.35),
            remarks: "-".to_string(),
        }
    }

    #[test]
    fn test_side_parse_normalizes_case_and_whitespace() {
        assert_eq!(Side::parse(" buy "), Some(Side::Buy));
        assert_eq!(Side::parse("Sell"), Some(Side::Sell));
        assert_eq!(Side::parse("b"), Some(Side::Buy));
        assert_eq!(Side::parse("S"), Some(Side::Sell));
    }

    #[test]
    fn test_side_parse_rejects_unknown_values() {
        assert_eq!(Side::parse("HOLD"), None);
        assert_eq!(Side::parse(""), None);
        assert_eq!(Side::parse("BUYSELL"), None);
    }

    #[test]
    fn test_signed_quantity_follows_side() {
        let buy = SignedTrade::from(record(Side::Buy, 1_500));
        let sell = SignedTrade::from(record(Side::Sell, 1_500));

        assert_eq!(buy.signed_quantity, 1_500);
        assert_eq!(sell.signed_quantity, -1_500);
        assert_eq!(buy.signed_quantity.unsigned_abs(), buy.record.quantity.get());
        assert_eq!(sell.signed_quantity.unsigned_abs(), sell.record.quantity.get());
    }

    #[test]
    fn test_sign_all_keeps_order() {
        let signed = sign_all(vec![
            record(Side::Buy, 10),
            record(Side::Sell, 20),
            record(Side::Buy, 0),
        ]);
        let qtys: Vec<i64> = signed.iter().map(|t| t.signed_quantity).collect();
        assert_eq!(qtys, vec![10, -20, 0]);
    }

    #[test]
    fn test_largest_quantity_keeps_its_magnitude() {
        assert!(Quantity::new(Quantity::MAX + 1).is_none());

        let sell = SignedTrade::from(record(Side::Sell, Quantity::MAX));
        assert_eq!(sell.signed_quantity, -i64::MAX);
        assert_eq!(sell.signed_quantity.unsigned_abs(), sell.record.quantity.get());
    }

    #[test]
    fn test_quantity_deserialization_is_bounded() {
        let ok: Quantity = serde_json::from_str("42").unwrap();
        assert_eq!(ok.get(), 42);
        assert!(serde_json::from_str::<Quantity>("9223372036854775808").is_err());
    }

    #[test]
    fn test_trade_date_keys() {
        let parsed = TradeDate::from(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(parsed.key(), "2024-01-02");
        assert!(parsed.parsed().is_some());

        let raw = TradeDate::Raw("Q1 2024 wk 1".to_string());
        assert_eq!(raw.key(), "Q1 2024 wk 1");
        assert_eq!(raw.parsed(), None);
    }
}
