mod properties;

use super::SpreadFs;
use std::io::Write;
use std::path::PathBuf;

/// Write `content` under `key` through the create path and return the mapped path
fn put(store: &SpreadFs, key: &str, content: &[u8]) -> PathBuf {
    let path = store.map(key);
    let mut file = store.create(&path).unwrap();
    file.write_all(content).unwrap();
    path
}
