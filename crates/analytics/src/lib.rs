//! # Superstore Analytics
//!
//! Turns the raw transaction table into the grouped views the dashboard draws.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** No I/O and no knowledge of charts. It depends only on
//!   `core-types`.
//! - **Compute Once:** `AnalyticsEngine::build` materialises every view at
//!   startup. Later per-year filtering is a selection over these views, never a
//!   re-aggregation from raw rows.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: the group-by/sort/reshape functions.
//! - `SalesViews` and its row types: the materialised aggregates.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod views;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{AnalyticsEngine, DEFAULT_TOP_N};
pub use error::AnalyticsError;
pub use views::{CustomerYearSales, MetricRow, ProductTotals, SalesViews, SegmentYearSales};
