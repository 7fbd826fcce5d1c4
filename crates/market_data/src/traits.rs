use async_trait::async_trait;
use common::error::DealError;

/// Anything that can hand over the raw bytes of a bulk deal file.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DealSource: Send + Sync {
    /// Human readable location, used in logs and error messages.
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<Vec<u8>, DealError>;
}
