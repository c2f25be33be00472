//! Sharded, content-addressable file store
//!
//! This module provides the durable backing store for the server's file
//! caches:
//! - Key mapping to `<root>/<xx>/<yy>/<sha1-hex>` paths
//! - Lazy creation of shard directories
//! - Bootstrap reload of existing entries into an external index
//!
//! Eviction and expiry belong to the cache manager using this store.

pub mod paths;

mod builder;
mod operations;
mod reload;
mod types;

pub use types::{ReloadOptions, ReloadSummary, SpreadFs};

#[cfg(test)]
mod tests;
