//! Cross-module tests for the analytics core
//!
//! Tests are organized by topic:
//! - `properties` - Seeded randomized checks of the statistical invariants
//! - `records` - Record-set pipelines: completeness, field correlation, cost outliers, export
//! - `what_if` - What-if and sensitivity scenarios against deterministic predictors

mod properties;
