use std::time::Duration;

use async_trait::async_trait;
use common::error::DealError;
use reqwest::{Client, Url};
use tracing::{debug, error, info};

use crate::traits::DealSource;

#[derive(Clone)]
pub struct DealsClient {
    client: Client,
    url: Url,
}

impl DealsClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, DealError> {
        let url = Url::parse(url).map_err(|e| DealError::Http(format!("Invalid url {}: {}", url, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(DealError::Http(format!(
                "Unsupported scheme {} in {}",
                url.scheme(),
                url
            )));
        }

        let client = Client::builder()
            .user_agent("bulk_deal_dashboard/0.1.0")
            .timeout(timeout)
            .build()
            .map_err(|e| DealError::Http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl DealSource for DealsClient {
    fn describe(&self) -> String {
        self.url.to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>, DealError> {
        info!("Fetching bulk deals from {}", self.url);

        let resp = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| DealError::Http(format!("Request to {} failed: {}", self.url, e)))?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            error!("Bulk deal download failed ({}): {}", status, error_text);
            return Err(DealError::Http(format!("HTTP {} from {}", status, self.url)));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| DealError::Http(format!("Failed to read body: {}", e)))?;
        debug!("Downloaded {} bytes", body.len());

        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unparseable_url() {
        let result = DealsClient::new("not a url", Duration::from_secs(1));
        assert!(matches!(result, Err(DealError::Http(_))));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let result = DealsClient::new("ftp://example.com/bulk_deals.csv", Duration::from_secs(1));
        assert!(matches!(result, Err(DealError::Http(_))));
    }

    #[test]
    fn test_describe_is_the_url() {
        let client =
            DealsClient::new("https://example.com/bulk_deals.csv", Duration::from_secs(1)).unwrap();
        assert_eq!(client.describe(), "https://example.com/bulk_deals.csv");
        assert_eq!(client.url().host_str(), Some("example.com"));
    }
}
