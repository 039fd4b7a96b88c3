use calamine::Data;
use chrono::NaiveDateTime;
use std::fmt;

/// A format-neutral cell value.
///
/// Workbook cells and csv fields are both lowered to this type so a single set
/// of column parsers serves every input format.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
}

impl Cell {
    /// Trims the text; blank text is `Empty`.
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(trimmed.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(text) => f.write_str(text),
            Cell::Number(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                write!(f, "{}", *value as i64)
            }
            Cell::Number(value) => write!(f, "{}", value),
            Cell::DateTime(value) => write!(f, "{}", value),
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(text) => Cell::from_text(text),
            Data::Int(value) => Cell::Number(*value as f64),
            Data::Float(value) => Cell::Number(*value),
            Data::Bool(value) => Cell::Text(value.to_string()),
            Data::DateTime(value) => value
                .as_datetime()
                .map(Cell::DateTime)
                .unwrap_or_else(|| Cell::Number(value.as_f64())),
            Data::DateTimeIso(text) | Data::DurationIso(text) => Cell::from_text(text),
            Data::Error(error) => Cell::Text(error.to_string()),
        }
    }
}
