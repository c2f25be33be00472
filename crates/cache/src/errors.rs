//! Error handling for the spread cache store
//!
//! Every error carries a recovery hint so the cache manager sitting on top
//! of the store can decide between retrying, degrading, or surfacing it.

mod conversions;
mod display;
mod recovery;
mod types;

pub use types::*;
