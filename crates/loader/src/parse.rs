use crate::cell::Cell;
use crate::columns::{self, ColumnMap};
use crate::error::ParseError;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use core_types::{PostalCode, Transaction};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::str::FromStr;

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

// Largest serial Excel can display (9999-12-31).
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// Converts one data row into a `Transaction`.
pub fn parse_row(row: usize, cells: &[Cell], columns: &ColumnMap) -> Result<Transaction, ParseError> {
    let cell = |index: usize| cells.get(index).unwrap_or(&Cell::Empty);
    let optional = |index: Option<usize>| index.map(cell).unwrap_or(&Cell::Empty);

    let order_date = parse_date(row, columns::ORDER_DATE, cell(columns.order_date))?;
    let ship_date = parse_date(row, columns::SHIP_DATE, cell(columns.ship_date))?;

    Ok(Transaction {
        customer_id: text(cell(columns.customer_id)),
        country: text(cell(columns.country)),
        order_date,
        ship_date,
        postal_code: parse_postal_code(cell(columns.postal_code)),
        product_id: text(cell(columns.product_id)),
        category: text(cell(columns.category)),
        sub_category: text(cell(columns.sub_category)),
        product_name: text(cell(columns.product_name)),
        sales: parse_decimal(row, columns::SALES, cell(columns.sales))?,
        profit: parse_decimal(row, columns::PROFIT, cell(columns.profit))?,
        quantity: parse_quantity(row, columns::QUANTITY, cell(columns.quantity))?,
        discount: parse_optional_decimal(row, columns::DISCOUNT, optional(columns.discount))?,
        shipping_cost: parse_optional_decimal(
            row,
            columns::SHIPPING_COST,
            optional(columns.shipping_cost),
        )?,
    })
}

/// Parses a date cell: a native date, an Excel serial number, or text in one
/// of the accepted layouts. A time of day, if present, is dropped.
pub fn parse_date(row: usize, column: &'static str, cell: &Cell) -> Result<NaiveDate, ParseError> {
    let error = |reason: &str| ParseError {
        row,
        column,
        value: cell.to_string(),
        reason: reason.to_string(),
    };

    match cell {
        Cell::DateTime(value) => Ok(value.date()),
        Cell::Number(serial) => from_excel_serial(*serial).ok_or_else(|| error("serial date out of range")),
        Cell::Text(text) => parse_date_text(text).ok_or_else(|| error("unrecognised date format")),
        Cell::Empty => Err(error("missing date")),
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|value| value.date())
        })
}

/// Excel's day zero is 1899-12-30 once its fictitious 1900-02-29 is accounted for.
fn from_excel_serial(serial: f64) -> Option<NaiveDate> {
    if !(1.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.floor() as i64))
}

pub fn parse_decimal(row: usize, column: &'static str, cell: &Cell) -> Result<Decimal, ParseError> {
    let error = |reason: &str| ParseError {
        row,
        column,
        value: cell.to_string(),
        reason: reason.to_string(),
    };

    match cell {
        Cell::Number(value) => Decimal::from_f64(*value).ok_or_else(|| error("not a finite number")),
        Cell::Text(text) => {
            let cleaned: String = text.chars().filter(|c| !matches!(c, '$' | ',')).collect();
            Decimal::from_str(&cleaned)
                .or_else(|_| Decimal::from_scientific(&cleaned))
                .map_err(|_| error("not a number"))
        }
        Cell::Empty => Err(error("missing value")),
        Cell::DateTime(_) => Err(error("expected a number, found a date")),
    }
}

fn parse_optional_decimal(
    row: usize,
    column: &'static str,
    cell: &Cell,
) -> Result<Decimal, ParseError> {
    if cell.is_empty() {
        Ok(Decimal::ZERO)
    } else {
        parse_decimal(row, column, cell)
    }
}

pub fn parse_quantity(row: usize, column: &'static str, cell: &Cell) -> Result<i64, ParseError> {
    let error = |reason: &str| ParseError {
        row,
        column,
        value: cell.to_string(),
        reason: reason.to_string(),
    };

    let value = match cell {
        Cell::Number(value) => *value,
        Cell::Text(text) => {
            if let Ok(whole) = text.parse::<i64>() {
                return Ok(whole);
            }
            text.parse::<f64>().map_err(|_| error("not an integer"))?
        }
        Cell::Empty => return Err(error("missing value")),
        Cell::DateTime(_) => return Err(error("expected an integer, found a date")),
    };

    if value.is_finite() && value.fract() == 0.0 {
        Ok(value as i64)
    } else {
        Err(error("not an integer"))
    }
}

fn parse_postal_code(cell: &Cell) -> Option<PostalCode> {
    match cell {
        Cell::Empty => None,
        Cell::Number(value) => PostalCode::from_number(*value),
        Cell::Text(text) => PostalCode::coerce(text),
        Cell::DateTime(value) => Some(PostalCode::Raw(value.to_string())),
    }
}

fn text(cell: &Cell) -> String {
    cell.to_string()
}
