//! Robo-advisor platform schemas.
//!
//! Each platform has a fixed lineup of standard product categories. Any other
//! key a user adds under that platform is a custom category.

mod platform_classifier;
mod platforms_model;

pub use platform_classifier::*;
pub use platforms_model::*;
