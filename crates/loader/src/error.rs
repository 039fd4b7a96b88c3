use thiserror::Error;

/// A single cell that could not be converted to its column's type.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("row {row}, column '{column}': cannot parse '{value}' ({reason})")]
pub struct ParseError {
    /// 1-based row number as shown by a spreadsheet application.
    pub row: usize,
    pub column: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Spreadsheet error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Worksheet '{sheet}' not found (available: {available})")]
    SheetNotFound { sheet: String, available: String },

    #[error("Required column '{0}' is missing from the header row")]
    MissingColumn(&'static str),

    #[error("The sheet has no header row")]
    EmptySheet,

    #[error("Unsupported file format '{0}'")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
