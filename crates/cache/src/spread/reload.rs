//! Bootstrap reload of entries already on disk

use crate::errors::{CacheError, RecoveryHint, Result};
use std::path::Path;
use std::time::Instant;
use walkdir::WalkDir;

use super::paths::{self, SHARD_LEVELS};
use super::types::{ReloadOptions, ReloadSummary, SpreadFs};

impl SpreadFs {
    /// Replay every entry on disk to `visit`, once per entry, in no
    /// particular order.
    ///
    /// The visitor receives the entry's absolute path as both the key and the
    /// path. Digests are one-way, so the original key cannot be recovered;
    /// the path is the durable handle an index stores and later hands back to
    /// [`SpreadFs::open`] or [`SpreadFs::map`], which returns it unchanged.
    /// Existing on-disk caches depend on this contract.
    ///
    /// Unreadable entries and directories are logged and skipped. Only a
    /// failure to read the cache root aborts the reload.
    pub fn reload<F>(&self, visit: F) -> Result<ReloadSummary>
    where
        F: FnMut(&Path, &Path),
    {
        self.reload_with(&ReloadOptions::default(), visit)
    }

    /// [`SpreadFs::reload`] with cancellation and a time limit
    pub fn reload_with<F>(&self, options: &ReloadOptions, mut visit: F) -> Result<ReloadSummary>
    where
        F: FnMut(&Path, &Path),
    {
        let root = &self.inner.root;
        if let Err(e) = std::fs::read_dir(root) {
            tracing::error!(root = %root.display(), error = %e, "failed to read cache root");
            return Err(CacheError::from_io(root, "read cache root", e));
        }

        let started = Instant::now();
        let mut summary = ReloadSummary::default();

        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(SHARD_LEVELS + 1)
            .follow_links(false);

        for entry in walker {
            if options.is_cancelled() {
                return Err(CacheError::Cancelled {
                    operation: "reload",
                    completed: summary.visited,
                    recovery_hint: RecoveryHint::RebuildIndex,
                });
            }
            if let Some(timeout) = options.timeout {
                if started.elapsed() >= timeout {
                    return Err(CacheError::Timeout {
                        operation: "reload",
                        duration: timeout,
                        recovery_hint: RecoveryHint::RebuildIndex,
                    });
                }
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(
                        path = %e.path().map(|p| p.display().to_string()).unwrap_or_default(),
                        error = %e,
                        "skipping unreadable cache entry"
                    );
                    summary.errors += 1;
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !paths::is_mapped_path(root, path) {
                tracing::debug!(path = %path.display(), "ignoring foreign file in cache root");
                summary.skipped += 1;
                continue;
            }

            visit(path, path);
            summary.visited += 1;
        }

        tracing::info!(
            root = %root.display(),
            entries = summary.visited,
            skipped = summary.skipped,
            errors = summary.errors,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "loaded spread cache"
        );

        Ok(summary)
    }
}
