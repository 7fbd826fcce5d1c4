use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use common::models::sign_all;
use market_data::{DataOrigin, DealSource, DealsClient, FallbackLoader, LoadedDeals, LocalFileSource};
use strategy::{ScoredTable, build_report};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Where deals come from. Two equal sources name the same dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub remote_url: Option<String>,
    pub local_path: PathBuf,
    pub timeout: Duration,
}

impl SourceSpec {
    pub fn loader(&self) -> FallbackLoader {
        let primary: Option<Box<dyn DealSource>> = match &self.remote_url {
            Some(url) => match DealsClient::new(url, self.timeout) {
                Ok(client) => Some(Box::new(client)),
                Err(e) => {
                    warn!("Remote source disabled: {}", e);
                    None
                }
            },
            None => None,
        };
        FallbackLoader::new(primary, Box::new(LocalFileSource::new(&self.local_path)))
    }
}

/// A loaded dataset and the scored table derived from it.
#[derive(Debug)]
pub struct DealBook {
    pub loaded: LoadedDeals,
    pub table: ScoredTable,
}

impl DealBook {
    pub fn build(loaded: LoadedDeals) -> anyhow::Result<Self> {
        let trades = sign_all(loaded.report.records.iter().cloned());
        let table = build_report(&trades)?;
        Ok(Self { loaded, table })
    }

    pub fn is_empty(&self) -> bool {
        self.loaded.report.is_empty()
    }
}

struct CacheEntry {
    spec: SourceSpec,
    local_modified: Option<SystemTime>,
    book: Arc<DealBook>,
}

/// Per-session cache of the loaded table.
///
/// The cached book is reused until the requested `SourceSpec` changes, the
/// local file it was read from gets a new modification time, or
/// `invalidate` is called. A reload that yields byte-identical data keeps
/// the existing book.
pub struct SessionCache {
    id: Uuid,
    entry: Option<CacheEntry>,
    fetches: usize,
    rebuilds: usize,
}

impl SessionCache {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            entry: None,
            fetches: 0,
            rebuilds: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Times the source was read.
    pub fn fetches(&self) -> usize {
        self.fetches
    }

    /// Times the scored table was recomputed from fresh data.
    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }

    pub fn invalidate(&mut self) {
        debug!("Session {}: cache invalidated", self.id);
        self.entry = None;
    }

    /// Book held by the cache, without checking whether it is still fresh.
    pub fn cached(&self) -> Option<Arc<DealBook>> {
        self.entry.as_ref().map(|entry| entry.book.clone())
    }

    /// Returns the cached book or reloads it. A failed reload leaves the
    /// previous entry in place.
    pub async fn get(&mut self, spec: &SourceSpec) -> anyhow::Result<Arc<DealBook>> {
        if let Some(entry) = &self.entry {
            if !Self::is_stale(entry, spec).await {
                return Ok(entry.book.clone());
            }
        }

        let loaded = spec.loader().load().await?;
        self.fetches += 1;

        let local_modified = match loaded.origin {
            DataOrigin::Local(_) => LocalFileSource::new(&spec.local_path).modified().await,
            DataOrigin::Remote(_) => None,
        };

        let unchanged = self
            .entry
            .as_ref()
            .filter(|entry| entry.spec == *spec && entry.book.loaded.fingerprint == loaded.fingerprint)
            .map(|entry| entry.book.clone());

        let book = match unchanged {
            Some(book) => {
                info!("Session {}: source unchanged, keeping cached table", self.id);
                book
            }
            None => {
                let book = Arc::new(DealBook::build(loaded)?);
                self.rebuilds += 1;
                info!(
                    "Session {}: {} symbols scored from {} deals ({} rows skipped)",
                    self.id,
                    book.table.len(),
                    book.loaded.report.records.len(),
                    book.loaded.report.issues.len()
                );
                book
            }
        };

        self.entry = Some(CacheEntry {
            spec: spec.clone(),
            local_modified,
            book: book.clone(),
        });
        Ok(book)
    }

    async fn is_stale(entry: &CacheEntry, spec: &SourceSpec) -> bool {
        if entry.spec != *spec {
            return true;
        }
        match entry.book.loaded.origin {
            DataOrigin::Local(_) => {
                let current = LocalFileSource::new(&spec.local_path).modified().await;
                current != entry.local_modified
            }
            DataOrigin::Remote(_) => false,
        }
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new()
    }
}
