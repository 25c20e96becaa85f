//! Aggregation engine over asset trees.

mod aggregation_service;

pub use aggregation_service::*;
