use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Calendar year derived from a transaction's ship date.
pub type Year = i32;

/// A postal code as found in the source sheet.
///
/// Most countries in the data set have no postal code at all, and some carry
/// alphanumeric codes. Integer coercion is best effort: anything that is not a
/// whole number keeps its original text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostalCode {
    Numeric(i64),
    Raw(String),
}

impl PostalCode {
    /// Coerces a text cell. Blank text means "no postal code".
    pub fn coerce(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(code) = trimmed.parse::<i64>() {
            return Some(PostalCode::Numeric(code));
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() && value.fract() == 0.0 => {
                Some(PostalCode::Numeric(value as i64))
            }
            _ => Some(PostalCode::Raw(trimmed.to_string())),
        }
    }

    /// Coerces a numeric spreadsheet cell, which is always read as a float.
    pub fn from_number(value: f64) -> Option<Self> {
        if value.is_nan() {
            None
        } else if value.is_finite() && value.fract() == 0.0 {
            Some(PostalCode::Numeric(value as i64))
        } else {
            Some(PostalCode::Raw(value.to_string()))
        }
    }
}

/// One retail order line from the `Orders` sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub customer_id: String,
    pub country: String,
    pub order_date: NaiveDate,
    /// Drives the year every aggregate is keyed on. Not checked against `order_date`.
    pub ship_date: NaiveDate,
    pub postal_code: Option<PostalCode>,
    pub product_id: String,
    pub category: String,
    pub sub_category: String,
    pub product_name: String,
    pub sales: Decimal,
    pub profit: Decimal,
    pub quantity: i64,
    pub discount: Decimal,
    pub shipping_cost: Decimal,
}

impl Transaction {
    pub fn year(&self) -> Year {
        self.ship_date.year()
    }
}
