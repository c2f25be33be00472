//! Spread store types and structures

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Sharded, content-addressable file store
///
/// Cloning is cheap and every clone addresses the same cache root. There is
/// no process-wide instance: whoever wires the application together creates
/// one and hands it to the components that need it.
#[derive(Clone)]
pub struct SpreadFs {
    pub(super) inner: Arc<SpreadFsInner>,
}

pub(super) struct SpreadFsInner {
    /// Absolute cache root
    pub root: PathBuf,
    /// Permission bits for the root and shard directories
    pub dir_mode: u32,
}

impl SpreadFs {
    /// The absolute cache root
    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    /// Permission bits used for created directories
    pub fn mode(&self) -> u32 {
        self.inner.dir_mode
    }

    /// Permission bits used for created entry files
    pub(super) fn file_mode(&self) -> u32 {
        self.inner.dir_mode & 0o666
    }
}

impl std::fmt::Debug for SpreadFs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpreadFs")
            .field("root", &self.inner.root)
            .field("dir_mode", &format_args!("{:04o}", self.inner.dir_mode))
            .finish()
    }
}

/// Outcome of a bootstrap reload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReloadSummary {
    /// Entries handed to the visitor
    pub visited: u64,
    /// Regular files that do not have the mapped layout
    pub skipped: u64,
    /// Entries or directories that could not be read
    pub errors: u64,
}

/// Cancellation controls for a bootstrap reload
#[derive(Debug, Clone, Default)]
pub struct ReloadOptions {
    pub(super) timeout: Option<Duration>,
    pub(super) cancel: Option<Arc<AtomicBool>>,
}

impl ReloadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort the walk once it has been running for `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Abort the walk as soon as `flag` becomes true
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub(super) fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}
