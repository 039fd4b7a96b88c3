use crate::cell::Cell;
use crate::columns::ColumnMap;
use crate::error::LoadError;
use crate::parse::parse_row;
use calamine::{open_workbook_auto, Reader};
use core_types::Transaction;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// How a file's contents are decoded, chosen from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Workbook,
    Csv,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "xla" | "ods" => Ok(SourceFormat::Workbook),
            "csv" => Ok(SourceFormat::Csv),
            _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// A spreadsheet holding the raw transaction table.
#[derive(Debug, Clone)]
pub struct SpreadsheetSource {
    path: PathBuf,
    sheet: String,
}

impl SpreadsheetSource {
    /// `sheet` names the worksheet to read; csv files have a single unnamed
    /// sheet and ignore it.
    pub fn new(path: impl Into<PathBuf>, sheet: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sheet: sheet.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    /// Reads and parses every order line.
    pub fn load(&self) -> Result<Vec<Transaction>, LoadError> {
        let rows = match SourceFormat::from_path(&self.path)? {
            SourceFormat::Workbook => self.read_workbook()?,
            SourceFormat::Csv => read_csv_rows(File::open(&self.path).map_err(csv::Error::from)?)?,
        };

        let transactions = parse_table(rows)?;
        tracing::info!(
            path = %self.path.display(),
            sheet = %self.sheet,
            rows = transactions.len(),
            "Loaded transaction table."
        );
        Ok(transactions)
    }

    fn read_workbook(&self) -> Result<Vec<NumberedRow>, LoadError> {
        let mut workbook = open_workbook_auto(&self.path)?;

        let available = workbook.sheet_names();
        if !available.iter().any(|name| name == &self.sheet) {
            return Err(LoadError::SheetNotFound {
                sheet: self.sheet.clone(),
                available: available.join(", "),
            });
        }

        let range = workbook.worksheet_range(&self.sheet)?;
        tracing::debug!(sheet = %self.sheet, size = ?range.get_size(), "Read worksheet range.");

        // The range starts at the first used cell, not necessarily at A1.
        let first_row = range.start().map_or(0, |(row, _)| row as usize);
        Ok(range
            .rows()
            .enumerate()
            .map(|(index, row)| (first_row + index + 1, row.iter().map(Cell::from).collect()))
            .collect())
    }
}

/// Loads transactions from csv text with a header row.
pub fn load_csv<R: Read>(reader: R) -> Result<Vec<Transaction>, LoadError> {
    parse_table(read_csv_rows(reader)?)
}

/// Cells of one row with its 1-based line in the source file.
type NumberedRow = (usize, Vec<Cell>);

fn read_csv_rows<R: Read>(reader: R) -> Result<Vec<NumberedRow>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        // Blank lines never become records, so count lines rather than records.
        let line = record
            .position()
            .map_or(rows.len() + 1, |position| position.line() as usize);
        rows.push((line, record.iter().map(Cell::from_text).collect()));
    }
    Ok(rows)
}

/// The first non-empty row is the header; fully empty rows are skipped.
fn parse_table(rows: Vec<NumberedRow>) -> Result<Vec<Transaction>, LoadError> {
    let mut numbered = rows
        .into_iter()
        .filter(|(_, cells)| !cells.iter().all(Cell::is_empty));

    let (_, header) = numbered.next().ok_or(LoadError::EmptySheet)?;
    let columns = ColumnMap::from_headers(header.iter().map(|cell| cell.to_string()))?;

    let mut transactions = Vec::new();
    for (row, cells) in numbered {
        transactions.push(parse_row(row, &cells, &columns)?);
    }
    Ok(transactions)
}
