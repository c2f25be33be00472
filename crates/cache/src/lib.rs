//! File cache backing store for tonearm
//!
//! This crate provides the durable, on-disk layer the server's file caches
//! (transcoded audio, resized artwork) sit on:
//! - Content-addressed paths sharded two levels deep
//! - Lazy shard directory creation
//! - Bootstrap reload so an in-memory index can warm-start from disk
//! - An async facade for use from the tokio runtime

pub mod bridge;
pub mod config;
pub mod entry;
pub mod errors;
pub mod spread;

pub use bridge::AsyncSpreadFs;
pub use config::{ConfigSource, SpreadFsConfig, SpreadFsConfigBuilder};
pub use entry::EntryInfo;
pub use errors::{CacheError, Error, RecoveryHint, Result};
pub use spread::{ReloadOptions, ReloadSummary, SpreadFs};
