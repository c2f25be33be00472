//! Spread store construction

use crate::config::SpreadFsConfig;
use crate::errors::{CacheError, RecoveryHint, Result};
use std::path::PathBuf;
use std::sync::Arc;

use super::operations::create_dirs;
use super::types::{SpreadFs, SpreadFsInner};

impl SpreadFs {
    /// Open a store rooted at `root`, creating the directory with `mode` if
    /// it does not exist yet.
    ///
    /// A relative root is resolved against the current directory so that
    /// every mapped and reloaded path is absolute.
    pub fn new(root: impl Into<PathBuf>, mode: u32) -> Result<Self> {
        let root = root.into();
        if root.as_os_str().is_empty() {
            return Err(CacheError::Configuration {
                message: "cache root must not be empty".to_string(),
                recovery_hint: RecoveryHint::UpdateConfiguration,
            });
        }

        let root = if root.is_absolute() {
            root
        } else {
            match std::env::current_dir() {
                Ok(cwd) => cwd.join(root),
                Err(e) => return Err(CacheError::from_io(&root, "resolve cache root", e)),
            }
        };

        match std::fs::metadata(&root) {
            Ok(meta) if !meta.is_dir() => {
                return Err(CacheError::Configuration {
                    message: format!("cache root '{}' is not a directory", root.display()),
                    recovery_hint: RecoveryHint::UpdateConfiguration,
                });
            }
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(CacheError::from_io(&root, "inspect cache root", e)),
        }

        match create_dirs(&root, mode) {
            Ok(()) => {}
            Err(e) => {
                return Err(CacheError::Io {
                    path: root.clone(),
                    operation: "create cache root",
                    source: e,
                    recovery_hint: RecoveryHint::CheckPermissions { path: root },
                });
            }
        }

        tracing::debug!(
            root = %root.display(),
            mode = %format!("{mode:04o}"),
            "opened spread cache"
        );

        Ok(Self {
            inner: Arc::new(SpreadFsInner {
                root,
                dir_mode: mode,
            }),
        })
    }

    /// Open a store from a resolved configuration
    pub fn from_config(config: &SpreadFsConfig) -> Result<Self> {
        Self::new(config.root.clone(), config.dir_mode)
    }
}
