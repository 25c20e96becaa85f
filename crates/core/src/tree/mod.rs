//! Asset tree module.
//!
//! This module defines the recursive, heterogeneous node type that represents
//! a portfolio or sub-portfolio, together with the predicates used to tell
//! categories, numeric leaves and labeled leaves apart in untyped documents.

mod tree_classifier;
mod tree_model;

pub use tree_classifier::*;
pub(crate) use tree_classifier::number_to_decimal;
pub use tree_model::*;

#[cfg(test)]
mod tree_model_tests;
