//! Property-based tests for the key mapper

use crate::spread::paths::{DIGEST_HEX_LEN, SHARD_LEVELS};
use crate::spread::SpreadFs;
use proptest::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use tempfile::TempDir;

fn store() -> (TempDir, SpreadFs) {
    let temp_dir = TempDir::new().unwrap();
    let store = SpreadFs::new(temp_dir.path().join("cache"), 0o755).unwrap();
    (temp_dir, store)
}

proptest! {
    #[test]
    fn map_is_deterministic(key in ".{1,200}") {
        let (_guard, store) = store();
        prop_assert_eq!(store.map(&key), store.map(&key));
    }

    #[test]
    fn map_is_idempotent(key in ".{1,200}") {
        let (_guard, store) = store();
        let mapped = store.map(&key);
        prop_assert_eq!(store.map(mapped.to_str().unwrap()), mapped);
    }

    #[test]
    fn map_has_fixed_shape(key in ".{1,200}") {
        let (_guard, store) = store();
        let mapped = store.map(&key);
        let relative = mapped.strip_prefix(store.root()).unwrap();

        prop_assert_eq!(relative.components().count(), SHARD_LEVELS + 1);
        let leaf = relative.file_name().unwrap().to_str().unwrap();
        prop_assert_eq!(leaf.len(), DIGEST_HEX_LEN);
        prop_assert!(store.is_mapped(&mapped));
    }

    #[test]
    fn distinct_keys_get_distinct_paths(
        keys in prop::collection::hash_set("[a-zA-Z0-9/._-]{1,64}", 1..200)
    ) {
        let (_guard, store) = store();
        let paths: HashSet<_> = keys.iter().map(|k| store.map(k)).collect();
        prop_assert_eq!(paths.len(), keys.len());
    }

    #[test]
    fn round_trip_preserves_bytes(
        key in ".{1,64}",
        content in prop::collection::vec(any::<u8>(), 0..4096)
    ) {
        let (_guard, store) = store();
        let path = store.map(&key);
        std::io::Write::write_all(&mut store.create(&path).unwrap(), &content).unwrap();
        prop_assert_eq!(std::fs::read(&path).unwrap(), content);
    }
}

#[test]
fn no_collisions_over_large_sample() {
    let root = Path::new("/srv/cache");
    let mut seen = HashSet::new();
    for i in 0..100_000u32 {
        let path = crate::spread::paths::mapped_path(root, &format!("track:{i}:mp3:192"));
        assert!(seen.insert(path), "collision at key {i}");
    }
}
