use common::error::DealError;
use sha2::{Digest, Sha256};
use tracing::{error, info, warn};

use crate::parser::{LoadReport, parse_deals};
use crate::traits::DealSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataOrigin {
    Remote(String),
    Local(String),
}

#[derive(Debug, Clone)]
pub struct LoadedDeals {
    pub report: LoadReport,
    pub origin: DataOrigin,
    /// Hex SHA-256 of the bytes the report was parsed from.
    pub fingerprint: String,
}

/// Remote first, local file second. Parse failures count as a failed
/// attempt, so a broken remote file also falls back.
pub struct FallbackLoader {
    primary: Option<Box<dyn DealSource>>,
    fallback: Box<dyn DealSource>,
}

impl FallbackLoader {
    pub fn new(primary: Option<Box<dyn DealSource>>, fallback: Box<dyn DealSource>) -> Self {
        Self { primary, fallback }
    }

    pub async fn load(&self) -> Result<LoadedDeals, DealError> {
        let remote_failure = match &self.primary {
            Some(source) => match Self::attempt(source.as_ref()).await {
                Ok((report, fingerprint)) => {
                    info!(
                        "Loaded {} deals from {}",
                        report.records.len(),
                        source.describe()
                    );
                    return Ok(LoadedDeals {
                        report,
                        origin: DataOrigin::Remote(source.describe()),
                        fingerprint,
                    });
                }
                Err(e) => {
                    warn!(
                        "Remote source {} failed: {}. Falling back to local file.",
                        source.describe(),
                        e
                    );
                    e.to_string()
                }
            },
            None => "remote source disabled".to_string(),
        };

        match Self::attempt(self.fallback.as_ref()).await {
            Ok((report, fingerprint)) => {
                info!(
                    "Loaded {} deals from {}",
                    report.records.len(),
                    self.fallback.describe()
                );
                Ok(LoadedDeals {
                    report,
                    origin: DataOrigin::Local(self.fallback.describe()),
                    fingerprint,
                })
            }
            Err(e) => {
                error!("Local source {} failed: {}", self.fallback.describe(), e);
                Err(DealError::SourceUnavailable {
                    remote: remote_failure,
                    local: e.to_string(),
                })
            }
        }
    }

    async fn attempt(source: &dyn DealSource) -> Result<(LoadReport, String), DealError> {
        let bytes = source.fetch().await?;
        let report = parse_deals(&bytes)?;
        Ok((report, fingerprint(&bytes)))
    }
}

pub fn fingerprint(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockDealSource;

    const GOOD: &[u8] = b"Date,Symbol,Buy / Sell,Quantity Traded\n02-Jan-2024,AAA,BUY,\"1,000\"\n";

    fn source(name: &'static str, body: Result<&'static [u8], &'static str>) -> Box<dyn DealSource> {
        let mut mock = MockDealSource::new();
        mock.expect_describe().return_const(name.to_string());
        mock.expect_fetch().returning(move || match body {
            Ok(bytes) => Ok(bytes.to_vec()),
            Err(msg) => Err(DealError::Http(msg.to_string())),
        });
        Box::new(mock)
    }

    fn untouched() -> Box<dyn DealSource> {
        let mut mock = MockDealSource::new();
        mock.expect_describe().return_const("local".to_string());
        mock.expect_fetch().never();
        Box::new(mock)
    }

    #[tokio::test]
    async fn test_remote_success_skips_local() {
        let loader = FallbackLoader::new(Some(source("remote", Ok(GOOD))), untouched());

        let loaded = loader.load().await.unwrap();

        assert_eq!(loaded.origin, DataOrigin::Remote("remote".to_string()));
        assert_eq!(loaded.report.records.len(), 1);
        assert_eq!(loaded.report.records[0].quantity.get(), 1_000);
        assert_eq!(loaded.fingerprint, fingerprint(GOOD));
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_to_local() {
        let loader = FallbackLoader::new(
            Some(source("remote", Err("connection refused"))),
            source("local", Ok(GOOD)),
        );

        let loaded = loader.load().await.unwrap();

        assert_eq!(loaded.origin, DataOrigin::Local("local".to_string()));
        assert_eq!(loaded.report.records.len(), 1);
    }

    #[tokio::test]
    async fn test_unparseable_remote_falls_back_to_local() {
        let loader = FallbackLoader::new(
            Some(source("remote", Ok(&b"<html>404</html>"[..]))),
            source("local", Ok(GOOD)),
        );

        let loaded = loader.load().await.unwrap();
        assert_eq!(loaded.origin, DataOrigin::Local("local".to_string()));
    }

    #[tokio::test]
    async fn test_both_failing_is_source_unavailable() {
        let loader = FallbackLoader::new(
            Some(source("remote", Err("timeout"))),
            source("local", Err("no such file")),
        );

        match loader.load().await {
            Err(DealError::SourceUnavailable { remote, local }) => {
                assert!(remote.contains("timeout"));
                assert!(local.contains("no such file"));
            }
            other => panic!("expected SourceUnavailable, got {:?}", other.map(|l| l.origin)),
        }
    }

    #[tokio::test]
    async fn test_disabled_remote_reads_local_only() {
        let loader = FallbackLoader::new(None, source("local", Ok(GOOD)));

        let loaded = loader.load().await.unwrap();
        assert_eq!(loaded.origin, DataOrigin::Local("local".to_string()));
    }

    #[test]
    fn test_fingerprint_is_stable_hex() {
        let fp = fingerprint(b"abc");
        assert_eq!(
            fp,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
