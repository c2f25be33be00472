//! Display implementations for cache errors

use super::types::{CacheError, RecoveryHint};
use std::fmt;

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io {
                path,
                operation,
                source,
                ..
            } => write!(
                f,
                "I/O error during {} on '{}': {}",
                operation,
                path.display(),
                source
            ),
            Self::NotFound { path, .. } => {
                write!(f, "Cache entry '{}' not found", path.display())
            }
            Self::PermissionDenied {
                path, operation, ..
            } => write!(
                f,
                "Permission denied for {} on '{}'",
                operation,
                path.display()
            ),
            Self::Configuration { message, .. } => {
                write!(f, "Cache configuration error: {message}")
            }
            Self::Cancelled {
                operation,
                completed,
                ..
            } => write!(
                f,
                "Cache {operation} cancelled after {completed} entries"
            ),
            Self::Timeout {
                operation,
                duration,
                ..
            } => write!(f, "Cache {operation} timed out after {duration:?}"),
            Self::TaskFailed {
                operation, reason, ..
            } => write!(f, "Blocking cache task {operation} failed: {reason}"),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for RecoveryHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Retry { after } => write!(f, "retry after {after:?}"),
            Self::CheckPermissions { path } => {
                write!(f, "check permissions on '{}'", path.display())
            }
            Self::RebuildIndex => write!(f, "rebuild the cache index with a reload"),
            Self::Recreate => write!(f, "recreate the entry"),
            Self::CheckDiskSpace => write!(f, "check available disk space"),
            Self::UpdateConfiguration => write!(f, "update the cache configuration"),
            Self::Ignore => write!(f, "safe to ignore"),
            Self::Manual { instructions } => write!(f, "{instructions}"),
        }
    }
}
