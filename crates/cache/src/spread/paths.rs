//! Key to path mapping for the spread store
//!
//! A key is hashed with SHA-1 and the lowercase hex digest becomes the leaf
//! file name. The first two hex pairs of the digest pick two shard
//! directories, giving 65,536 buckets below the cache root:
//!
//! ```text
//! <root>/<digest[0..2]>/<digest[2..4]>/<digest>
//! ```

use sha1::{Digest, Sha1};
use std::path::{Component, Path, PathBuf};

/// Hex characters per shard directory name
pub const SHARD_WIDTH: usize = 2;

/// Number of shard levels between the root and the leaf
pub const SHARD_LEVELS: usize = 2;

/// Hex characters in a leaf file name (160-bit digest)
pub const DIGEST_HEX_LEN: usize = 40;

/// Hash a cache key into its fixed-width hex digest
#[inline]
pub fn hash_key(key: &str) -> String {
    hex::encode(Sha1::digest(key.as_bytes()))
}

/// Build the mapped path for a key below `root`
pub fn mapped_path(root: &Path, key: &str) -> PathBuf {
    let hash = hash_key(key);
    path_from_hash(root, &hash)
}

/// Build the mapped path for an already computed digest
pub fn path_from_hash(root: &Path, hash: &str) -> PathBuf {
    root.join(&hash[..SHARD_WIDTH])
        .join(&hash[SHARD_WIDTH..SHARD_WIDTH * 2])
        .join(hash)
}

/// Structural check: is `candidate` a path this mapper produced for `root`?
///
/// The candidate must sit exactly two shard levels below `root`, every
/// segment must be lowercase hex of the right width, and the shard names must
/// repeat the leaf's leading characters.
pub fn is_mapped_path(root: &Path, candidate: &Path) -> bool {
    let relative = match candidate.strip_prefix(root) {
        Ok(relative) => relative,
        Err(_) => return false,
    };

    let mut segments = Vec::with_capacity(SHARD_LEVELS + 1);
    for component in relative.components() {
        match component {
            Component::Normal(segment) => match segment.to_str() {
                Some(segment) => segments.push(segment),
                None => return false,
            },
            _ => return false,
        }
    }

    let [shard1, shard2, leaf] = segments[..] else {
        return false;
    };

    leaf.len() == DIGEST_HEX_LEN
        && is_lower_hex(leaf)
        && shard1 == &leaf[..SHARD_WIDTH]
        && shard2 == &leaf[SHARD_WIDTH..SHARD_WIDTH * 2]
}

fn is_lower_hex(value: &str) -> bool {
    value
        .bytes()
        .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_hashing() {
        let hash1 = hash_key("abc");
        let hash2 = hash_key("abc");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), DIGEST_HEX_LEN);
        // Well-known SHA-1 test vector
        assert_eq!(hash1, "a9993e364706816aba3e25717850c26c9cd0d89d");
        assert_ne!(hash1, hash_key("abd"));
    }

    #[test]
    fn test_path_generation() {
        let root = Path::new("/tmp/cache");
        let path = mapped_path(root, "abc");

        assert_eq!(
            path,
            root.join("a9")
                .join("99")
                .join("a9993e364706816aba3e25717850c26c9cd0d89d")
        );
    }

    #[test]
    fn test_mapped_path_is_recognized() {
        let root = Path::new("/tmp/cache");
        let path = mapped_path(root, "some/song.mp3");
        assert!(is_mapped_path(root, &path));
    }

    #[test]
    fn test_foreign_paths_are_rejected() {
        let root = Path::new("/tmp/cache");
        let hash = hash_key("abc");

        // Under a different root
        assert!(!is_mapped_path(root, &mapped_path(Path::new("/tmp/other"), "abc")));
        // Missing a shard level
        assert!(!is_mapped_path(root, &root.join("a9").join(&hash)));
        // Shards that do not match the leaf
        assert!(!is_mapped_path(root, &root.join("00").join("00").join(&hash)));
        // Uppercase digest
        let upper = hash.to_uppercase();
        assert!(!is_mapped_path(
            root,
            &root.join(&upper[..2]).join(&upper[2..4]).join(&upper)
        ));
        // Temporary file inside a shard
        assert!(!is_mapped_path(root, &root.join("a9").join("99").join(".tmpXYZ")));
        // Parent traversal
        assert!(!is_mapped_path(
            root,
            &root.join("a9").join("..").join("99").join(&hash)
        ));
        // A raw key
        assert!(!is_mapped_path(root, Path::new("abc")));
    }
}
