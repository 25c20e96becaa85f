//! Portfolio snapshot module.
//!
//! This module holds the root `AssetAllocation` snapshot, the shape of a
//! recommendation response, and the portfolio-wide breakdowns computed from
//! them with the aggregation engine.

mod allocation_model;
mod allocation_service;

pub use allocation_model::*;
pub use allocation_service::*;
