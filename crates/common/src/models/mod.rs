pub mod summary;
pub mod trade;

pub use summary::{MarketBias, SecuritySummary};
pub use trade::{Quantity, Side, SignedTrade, TradeDate, TradeRecord, sign_all};
