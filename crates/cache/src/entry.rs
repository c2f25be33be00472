//! Metadata for entries on disk

use std::fs::Metadata;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

/// File-level information about a stored entry
///
/// The cache manager uses the access and modification times to drive its
/// own expiry; the store never acts on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    /// Mapped path of the entry
    pub path: PathBuf,
    /// Size in bytes
    pub len: u64,
    /// Last modification time
    pub modified: Option<SystemTime>,
    /// Last access time, when the platform tracks it
    pub accessed: Option<SystemTime>,
}

impl EntryInfo {
    pub(crate) fn from_metadata(path: PathBuf, metadata: &Metadata) -> Self {
        Self {
            path,
            len: metadata.len(),
            modified: metadata.modified().ok(),
            accessed: metadata.accessed().ok(),
        }
    }

    /// Time since the last modification, if known
    pub fn age(&self) -> Option<Duration> {
        self.modified
            .and_then(|modified| SystemTime::now().duration_since(modified).ok())
    }
}
