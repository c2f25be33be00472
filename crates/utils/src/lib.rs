//! Shared utilities for tonearm
//!
//! Directory conventions and logging setup used by the cache store and
//! the command-line tool.

pub mod tracing;
pub mod xdg;

pub use xdg::*;
