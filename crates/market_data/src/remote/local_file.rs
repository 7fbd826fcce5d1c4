use std::path::{Path, PathBuf};
use std::time::SystemTime;

use async_trait::async_trait;
use common::error::DealError;
use tracing::info;

use crate::traits::DealSource;

#[derive(Debug, Clone)]
pub struct LocalFileSource {
    path: PathBuf,
}

impl LocalFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Modification time of the file, `None` if it cannot be read.
    pub async fn modified(&self) -> Option<SystemTime> {
        let meta = tokio::fs::metadata(&self.path).await.ok()?;
        meta.modified().ok()
    }
}

#[async_trait]
impl DealSource for LocalFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>, DealError> {
        info!("Reading bulk deals from {}", self.path.display());
        Ok(tokio::fs::read(&self.path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_file_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Date,Symbol\n").unwrap();

        let source = LocalFileSource::new(file.path());
        let bytes = source.fetch().await.unwrap();

        assert_eq!(bytes, b"Date,Symbol\n");
        assert!(source.modified().await.is_some());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = LocalFileSource::new(dir.path().join("nope.csv"));

        assert!(matches!(source.fetch().await, Err(DealError::Io(_))));
        assert!(source.modified().await.is_none());
    }
}
