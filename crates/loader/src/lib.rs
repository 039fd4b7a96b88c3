//! # Superstore Loader
//!
//! Reads the raw transaction table from a spreadsheet once, at process start.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All file-format knowledge lives here. The rest of the system
//!   only ever sees `core_types::Transaction` values.
//! - **Fail Fast on Dates:** An unparseable order or ship date aborts the load
//!   with a `ParseError`; the dashboard never starts on half-parsed data.
//! - **Best-Effort Postal Codes:** Postal codes that are not whole numbers keep
//!   their original text instead of failing the load.
//!
//! ## Public API
//!
//! - `SpreadsheetSource`: a file path plus sheet name, with a `load` method.
//! - `load_csv`: parses csv text from any reader, mostly for tests and pipes.
//! - `LoadError` / `ParseError`: the errors this crate can return.

// Declare the modules that constitute this crate.
pub mod cell;
pub mod columns;
pub mod error;
pub mod parse;
pub mod source;

// Re-export the key components to create a clean, public-facing API.
pub use cell::Cell;
pub use columns::ColumnMap;
pub use error::{LoadError, ParseError};
pub use source::{load_csv, SourceFormat, SpreadsheetSource};
