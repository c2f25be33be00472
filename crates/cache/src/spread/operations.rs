//! Mapping and entry operations for the spread store

use crate::entry::EntryInfo;
use crate::errors::{CacheError, RecoveryHint, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::paths;
use super::types::SpreadFs;

/// Create `dir` and any missing parents with `mode`.
///
/// An existing directory is success, so concurrent callers racing on the
/// same shard all succeed.
pub(super) fn create_dirs(dir: &Path, mode: u32) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    builder.create(dir)
}

fn parent_of(path: &Path) -> Result<&Path> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(parent),
        _ => Err(CacheError::Configuration {
            message: format!("cache path '{}' has no parent directory", path.display()),
            recovery_hint: RecoveryHint::Manual {
                instructions: "Pass a path produced by SpreadFs::map".to_string(),
            },
        }),
    }
}

impl SpreadFs {
    /// Map a cache key to its on-disk path.
    ///
    /// Calling `map` on a path it produced returns that path again, so values
    /// that may be either a key or a mapped path can be passed through it
    /// freely. A mapped path is rebuilt in canonical form, dropping trailing
    /// or doubled separators.
    pub fn map(&self, key: &str) -> PathBuf {
        let candidate = Path::new(key);
        if paths::is_mapped_path(&self.inner.root, candidate) {
            if let Some(leaf) = candidate.file_name().and_then(|leaf| leaf.to_str()) {
                return paths::path_from_hash(&self.inner.root, leaf);
            }
        }
        paths::mapped_path(&self.inner.root, key)
    }

    /// Whether `path` has the layout of a path produced by [`SpreadFs::map`]
    pub fn is_mapped(&self, path: &Path) -> bool {
        paths::is_mapped_path(&self.inner.root, path)
    }

    /// Create or truncate the entry at `path` for writing, materializing the
    /// shard directories on the way.
    pub fn create(&self, path: impl AsRef<Path>) -> Result<File> {
        let path = path.as_ref();
        let parent = parent_of(path)?;

        match create_dirs(parent, self.inner.dir_mode) {
            Ok(()) => {}
            Err(e) => return Err(CacheError::from_io(parent, "create shard directory", e)),
        }

        let mut options = OpenOptions::new();
        options.read(true).write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(self.file_mode());
        }

        match options.open(path) {
            Ok(file) => {
                tracing::trace!(path = %path.display(), "created cache entry");
                Ok(file)
            }
            Err(e) => Err(CacheError::from_io(path, "create cache entry", e)),
        }
    }

    /// Open the entry at `path` for reading. Never creates anything.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<File> {
        let path = path.as_ref();
        match File::open(path) {
            Ok(file) => Ok(file),
            Err(e) => Err(CacheError::from_io(path, "open cache entry", e)),
        }
    }

    /// Write `data` to `path` through a temporary file in the same shard and
    /// an atomic rename, so concurrent readers see either the old or the new
    /// content, never a partial write.
    pub fn write_atomic(&self, path: impl AsRef<Path>, data: &[u8]) -> Result<()> {
        let path = path.as_ref();
        let parent = parent_of(path)?;

        match create_dirs(parent, self.inner.dir_mode) {
            Ok(()) => {}
            Err(e) => return Err(CacheError::from_io(parent, "create shard directory", e)),
        }

        let mut temp = match tempfile::NamedTempFile::new_in(parent) {
            Ok(temp) => temp,
            Err(e) => return Err(CacheError::from_io(parent, "create temporary entry", e)),
        };

        let written = temp
            .write_all(data)
            .and_then(|()| temp.as_file().sync_all());
        if let Err(e) = written {
            return Err(CacheError::from_io(temp.path(), "write temporary entry", e));
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(self.file_mode());
            if let Err(e) = temp.as_file().set_permissions(permissions) {
                return Err(CacheError::from_io(temp.path(), "set entry permissions", e));
            }
        }

        match temp.persist(path) {
            Ok(_) => {
                tracing::trace!(path = %path.display(), bytes = data.len(), "wrote cache entry");
                Ok(())
            }
            Err(e) => Err(CacheError::Io {
                path: path.to_path_buf(),
                operation: "rename temporary entry",
                source: e.error,
                recovery_hint: RecoveryHint::Retry {
                    after: std::time::Duration::from_millis(10),
                },
            }),
        }
    }

    /// Delete the entry at `path`. Shard directories are left in place.
    pub fn remove(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        match fs::remove_file(path) {
            Ok(()) => {
                tracing::trace!(path = %path.display(), "removed cache entry");
                Ok(())
            }
            Err(e) => Err(CacheError::from_io(path, "remove cache entry", e)),
        }
    }

    /// Delete every entry by purging the cache root, then recreate the root
    /// with the configured mode.
    pub fn remove_all(&self) -> Result<()> {
        let root = &self.inner.root;
        match fs::remove_dir_all(root) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(CacheError::from_io(root, "purge cache root", e)),
        }

        match create_dirs(root, self.inner.dir_mode) {
            Ok(()) => {
                tracing::info!(root = %root.display(), "purged spread cache");
                Ok(())
            }
            Err(e) => Err(CacheError::Io {
                path: root.clone(),
                operation: "create cache root",
                source: e,
                recovery_hint: RecoveryHint::CheckPermissions { path: root.clone() },
            }),
        }
    }

    /// File metadata for the entry at `path`
    pub fn stat(&self, path: impl AsRef<Path>) -> Result<EntryInfo> {
        let path = path.as_ref();
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) => return Err(CacheError::from_io(path, "stat cache entry", e)),
        };

        if !metadata.is_file() {
            return Err(CacheError::NotFound {
                path: path.to_path_buf(),
                recovery_hint: RecoveryHint::RebuildIndex,
            });
        }

        Ok(EntryInfo::from_metadata(path.to_path_buf(), &metadata))
    }
}
