//! # Superstore Dashboard
//!
//! Chart selectors and the control dispatch table of the sales dashboard.
//!
//! ## Architectural Principles
//!
//! - **Read-Only Context:** `DashboardContext` holds the views built once at
//!   startup. Nothing in this crate mutates it, so any number of UI sessions
//!   can share one instance.
//! - **Function per Control:** `controls::BINDINGS` maps each UI control to the
//!   pure functions that recompute its outputs. There is no callback graph and
//!   no global chart state.
//! - **Renderer Agnostic:** Selectors emit `Figure` values that serialise to
//!   Plotly-compatible JSON. Drawing is left to the front end.
//!
//! ## Public API
//!
//! - `DashboardContext`: the views plus the year domain of the controls.
//! - `dispatch` / `initial_layout`: what the UI shell calls.
//! - `selectors`: the per-chart pure functions.
//! - `Figure`: the chart description handed to the renderer.

// Declare the modules that constitute this crate.
pub mod bands;
pub mod context;
pub mod controls;
pub mod error;
pub mod figure;
pub mod layout;
pub mod selectors;

// Re-export the key components to create a clean, public-facing API.
pub use bands::{BandLayer, SalesBand, SALES_BANDS};
pub use context::DashboardContext;
pub use controls::{dispatch, Binding, ControlId, OutputId, OutputValue, Update, BINDINGS};
pub use error::DashboardError;
pub use figure::{Figure, Trace};
pub use layout::{initial_layout, DashboardLayout, DropdownSpec, SliderSpec};
