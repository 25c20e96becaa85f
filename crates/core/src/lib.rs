//! Networth Core - portfolio tree aggregation.
//!
//! This crate folds loosely typed, arbitrarily nested portfolio snapshots
//! into totals, sub-totals and percentages, and rescales them
//! proportionally. It owns no state and performs no I/O: snapshots are
//! loaded and stored by the caller.

pub mod aggregation;
pub mod allocation;
pub mod constants;
pub mod errors;
pub mod platforms;
pub mod tree;

// Re-export the engine and model types
pub use aggregation::*;
pub use allocation::*;
pub use platforms::*;
pub use tree::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
