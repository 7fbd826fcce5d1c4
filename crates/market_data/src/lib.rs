pub mod parser;
pub mod remote;
pub mod services;
pub mod traits;

pub use parser::{LoadReport, parse_deals};
pub use remote::{DealsClient, LocalFileSource};
pub use services::{DataOrigin, FallbackLoader, LoadedDeals};
pub use traits::DealSource;
