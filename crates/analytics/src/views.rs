use core_types::{Metric, PostalCode, Transaction, Year};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Totals for one (customer, country, year).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerYearSales {
    pub customer_id: String,
    pub country: String,
    pub year: Year,
    pub sales: Decimal,
    pub profit: Decimal,
    pub quantity: i64,
    pub discount: Decimal,
    pub shipping_cost: Decimal,
    /// Sum of the group's numeric postal codes, or the first non-numeric code
    /// seen, which is kept as-is.
    pub postal_code: Option<PostalCode>,
}

impl CustomerYearSales {
    pub(crate) fn empty(customer_id: &str, country: &str, year: Year) -> Self {
        Self {
            customer_id: customer_id.to_string(),
            country: country.to_string(),
            year,
            sales: Decimal::ZERO,
            profit: Decimal::ZERO,
            quantity: 0,
            discount: Decimal::ZERO,
            shipping_cost: Decimal::ZERO,
            postal_code: None,
        }
    }

    pub(crate) fn add(&mut self, tx: &Transaction) {
        self.sales += tx.sales;
        self.profit += tx.profit;
        self.quantity += tx.quantity;
        self.discount += tx.discount;
        self.shipping_cost += tx.shipping_cost;
        self.postal_code = merge_postal_codes(self.postal_code.take(), tx.postal_code.as_ref());
    }
}

fn merge_postal_codes(current: Option<PostalCode>, next: Option<&PostalCode>) -> Option<PostalCode> {
    match (current, next) {
        (Some(PostalCode::Raw(kept)), _) => Some(PostalCode::Raw(kept)),
        (_, Some(PostalCode::Raw(raw))) => Some(PostalCode::Raw(raw.clone())),
        (Some(PostalCode::Numeric(sum)), Some(PostalCode::Numeric(code))) => {
            Some(PostalCode::Numeric(sum.saturating_add(*code)))
        }
        (None, Some(PostalCode::Numeric(code))) => Some(PostalCode::Numeric(*code)),
        (current, None) => current,
    }
}

/// Totals for one product across all years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductTotals {
    pub product_id: String,
    pub category: String,
    pub sub_category: String,
    pub product_name: String,
    pub sales: Decimal,
    pub profit: Decimal,
    pub quantity: i64,
}

impl ProductTotals {
    /// Display key of the bar chart: `<product id>_<sub-category>`.
    pub fn label(&self) -> String {
        format!("{}_{}", self.product_id, self.sub_category)
    }
}

/// Sales of one category (or sub-category) in one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentYearSales {
    pub name: String,
    pub year: Year,
    pub sales: Decimal,
}

/// One (product, metric, value) triple of the long-form top-products series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRow {
    pub label: String,
    pub metric: Metric,
    pub value: Decimal,
}

/// Every aggregate the dashboard reads, materialised once at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesViews {
    /// Sorted by sales, descending.
    pub customer_year: Vec<CustomerYearSales>,
    /// Sorted by (sales, profit, quantity), descending.
    pub products: Vec<ProductTotals>,
    /// Sorted by label, ascending.
    pub top_products: Vec<MetricRow>,
    /// Sorted by (category, year).
    pub category_year: Vec<SegmentYearSales>,
    /// Sorted by (sub-category, year).
    pub sub_category_year: Vec<SegmentYearSales>,
}

impl SalesViews {
    /// Distinct ship years, ascending.
    pub fn years(&self) -> Vec<Year> {
        self.customer_year
            .iter()
            .map(|row| row.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_postal_codes_are_summed() {
        let merged = merge_postal_codes(Some(PostalCode::Numeric(10)), Some(&PostalCode::Numeric(5)));
        assert_eq!(merged, Some(PostalCode::Numeric(15)));
        assert_eq!(merge_postal_codes(None, Some(&PostalCode::Numeric(7))), Some(PostalCode::Numeric(7)));
        assert_eq!(merge_postal_codes(None, None), None);
    }

    #[test]
    fn the_first_raw_postal_code_is_retained() {
        let raw = PostalCode::Raw("EC1A".to_string());
        let merged = merge_postal_codes(Some(PostalCode::Numeric(10)), Some(&raw));
        assert_eq!(merged, Some(raw.clone()));
        let merged = merge_postal_codes(merged, Some(&PostalCode::Raw("N1".to_string())));
        assert_eq!(merged, Some(raw.clone()));
        assert_eq!(merge_postal_codes(Some(raw.clone()), Some(&PostalCode::Numeric(3))), Some(raw));
    }

    #[test]
    fn label_joins_product_and_sub_category() {
        let product = ProductTotals {
            product_id: "TEC-CO-10004722".to_string(),
            category: "Technology".to_string(),
            sub_category: "Copiers".to_string(),
            product_name: "Canon imageCLASS 2200".to_string(),
            sales: Decimal::ZERO,
            profit: Decimal::ZERO,
            quantity: 0,
        };
        assert_eq!(product.label(), "TEC-CO-10004722_Copiers");
    }
}
