//! Async facade over the spread store
//!
//! Store operations block on filesystem I/O. This wrapper moves them onto
//! tokio's blocking pool with `tokio::task::spawn_blocking` so they can be
//! awaited from the server's runtime without stalling its workers.

use crate::entry::EntryInfo;
use crate::errors::{CacheError, RecoveryHint, Result};
use crate::spread::{ReloadOptions, ReloadSummary, SpreadFs};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Async handle to a [`SpreadFs`]
#[derive(Clone, Debug)]
pub struct AsyncSpreadFs {
    store: SpreadFs,
}

impl AsyncSpreadFs {
    /// Wrap an already opened store
    pub fn new(store: SpreadFs) -> Self {
        Self { store }
    }

    /// Open a store without blocking the runtime
    pub async fn open_root(root: PathBuf, mode: u32) -> Result<Self> {
        let store = run_blocking("open cache root", move || SpreadFs::new(root, mode)).await?;
        Ok(Self::new(store))
    }

    /// The wrapped synchronous store
    pub fn store(&self) -> &SpreadFs {
        &self.store
    }

    /// Map a key to its path. Pure, so it stays synchronous.
    pub fn map(&self, key: &str) -> PathBuf {
        self.store.map(key)
    }

    /// Create or truncate the entry at `path`
    pub async fn create(&self, path: PathBuf) -> Result<tokio::fs::File> {
        let store = self.store.clone();
        let file = run_blocking("create cache entry", move || store.create(&path)).await?;
        Ok(tokio::fs::File::from_std(file))
    }

    /// Open the entry at `path` for reading
    pub async fn open(&self, path: PathBuf) -> Result<tokio::fs::File> {
        let store = self.store.clone();
        let file = run_blocking("open cache entry", move || store.open(&path)).await?;
        Ok(tokio::fs::File::from_std(file))
    }

    /// Atomically replace the entry at `path` with `data`
    pub async fn write(&self, path: PathBuf, data: Vec<u8>) -> Result<()> {
        let store = self.store.clone();
        run_blocking("write cache entry", move || store.write_atomic(&path, &data)).await
    }

    /// Read the whole entry at `path`
    pub async fn read(&self, path: PathBuf) -> Result<Vec<u8>> {
        let store = self.store.clone();
        run_blocking("read cache entry", move || {
            let mut file = store.open(&path)?;
            let mut data = Vec::new();
            match file.read_to_end(&mut data) {
                Ok(_) => Ok(data),
                Err(e) => Err(CacheError::from_io(&path, "read cache entry", e)),
            }
        })
        .await
    }

    /// Delete the entry at `path`
    pub async fn remove(&self, path: PathBuf) -> Result<()> {
        let store = self.store.clone();
        run_blocking("remove cache entry", move || store.remove(&path)).await
    }

    /// Purge every entry
    pub async fn remove_all(&self) -> Result<()> {
        let store = self.store.clone();
        run_blocking("purge cache root", move || store.remove_all()).await
    }

    /// Metadata for the entry at `path`
    pub async fn stat(&self, path: PathBuf) -> Result<EntryInfo> {
        let store = self.store.clone();
        run_blocking("stat cache entry", move || store.stat(&path)).await
    }

    /// Run a bootstrap reload on the blocking pool
    pub async fn reload<F>(&self, options: ReloadOptions, visit: F) -> Result<ReloadSummary>
    where
        F: FnMut(&Path, &Path) + Send + 'static,
    {
        let store = self.store.clone();
        run_blocking("reload", move || store.reload_with(&options, visit)).await
    }

    /// Collect the paths of every entry on disk
    pub async fn reload_paths(
        &self,
        options: ReloadOptions,
    ) -> Result<(Vec<PathBuf>, ReloadSummary)> {
        let store = self.store.clone();
        run_blocking("reload", move || {
            let mut paths = Vec::new();
            let summary =
                store.reload_with(&options, |_, path| paths.push(path.to_path_buf()))?;
            Ok((paths, summary))
        })
        .await
    }
}

async fn run_blocking<T, F>(operation: &'static str, task: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(task).await {
        Ok(result) => result,
        Err(e) => Err(CacheError::TaskFailed {
            operation,
            reason: e.to_string(),
            recovery_hint: RecoveryHint::Retry {
                after: Duration::from_millis(10),
            },
        }),
    }
}
