//! Error conversion utilities

use super::types::{CacheError, RecoveryHint};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

impl CacheError {
    /// Build an error from an I/O failure on `path`, classifying the kinds the
    /// store callers branch on.
    pub fn from_io(path: &Path, operation: &'static str, error: std::io::Error) -> Self {
        match error.kind() {
            ErrorKind::NotFound => Self::NotFound {
                path: path.to_path_buf(),
                recovery_hint: RecoveryHint::Recreate,
            },
            ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
                operation,
                recovery_hint: RecoveryHint::CheckPermissions {
                    path: path.to_path_buf(),
                },
            },
            kind => Self::Io {
                path: path.to_path_buf(),
                operation,
                source: error,
                recovery_hint: hint_for_kind(kind, path),
            },
        }
    }
}

fn hint_for_kind(kind: ErrorKind, path: &Path) -> RecoveryHint {
    match kind {
        ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted => {
            RecoveryHint::Retry {
                after: Duration::from_millis(100),
            }
        }
        ErrorKind::AlreadyExists => RecoveryHint::Ignore,
        ErrorKind::OutOfMemory | ErrorKind::WriteZero => RecoveryHint::CheckDiskSpace,
        _ => RecoveryHint::CheckPermissions {
            path: path.to_path_buf(),
        },
    }
}

/// Error conversion utilities
impl From<std::io::Error> for CacheError {
    fn from(error: std::io::Error) -> Self {
        Self::from_io(&PathBuf::from("."), "unknown", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_classified() {
        let err = CacheError::from_io(
            Path::new("/cache/ab/cd/missing"),
            "open cache entry",
            std::io::Error::from(ErrorKind::NotFound),
        );
        assert!(err.is_not_found());
        assert!(err.to_string().contains("/cache/ab/cd/missing"));
    }

    #[test]
    fn test_permission_denied_keeps_operation() {
        let err = CacheError::from_io(
            Path::new("/cache"),
            "create cache root",
            std::io::Error::from(ErrorKind::PermissionDenied),
        );
        match err {
            CacheError::PermissionDenied { operation, .. } => {
                assert_eq!(operation, "create cache root")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_other_kinds_stay_io() {
        let err = CacheError::from_io(
            Path::new("/cache/ab"),
            "create shard directory",
            std::io::Error::new(ErrorKind::Other, "boom"),
        );
        assert!(matches!(err, CacheError::Io { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_interrupted_io_is_transient() {
        let interrupted = CacheError::from_io(
            Path::new("/cache/ab/cd"),
            "write temporary entry",
            std::io::Error::from(ErrorKind::Interrupted),
        );
        assert!(interrupted.is_transient());

        let missing = CacheError::from_io(
            Path::new("/cache/ab/cd/missing"),
            "open cache entry",
            std::io::Error::from(ErrorKind::NotFound),
        );
        assert!(!missing.is_transient());
    }
}
