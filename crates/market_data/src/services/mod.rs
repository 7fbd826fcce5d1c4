pub mod loader;

pub use loader::{DataOrigin, FallbackLoader, LoadedDeals, fingerprint};
