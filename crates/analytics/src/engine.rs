use crate::error::AnalyticsError;
use crate::views::{CustomerYearSales, MetricRow, ProductTotals, SalesViews, SegmentYearSales};
use core_types::{Metric, Transaction, Year};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

/// Number of products in the top-products chart unless configured otherwise.
pub const DEFAULT_TOP_N: usize = 10;

/// A stateless calculator for the dashboard's grouped views.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    top_n: usize,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self { top_n: DEFAULT_TOP_N }
    }
}

impl AnalyticsEngine {
    /// Creates an engine whose top-products view keeps `top_n` products.
    pub fn new(top_n: usize) -> Result<Self, AnalyticsError> {
        if top_n == 0 {
            return Err(AnalyticsError::InvalidParameters(
                "top_n must be greater than 0".to_string(),
            ));
        }
        Ok(Self { top_n })
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// The main entry point: materialises every view from the raw table.
    ///
    /// An empty table yields empty views.
    pub fn build(&self, transactions: &[Transaction]) -> SalesViews {
        let products = self.product_totals(transactions);
        let top_products = self.top_products_long(&products);

        let views = SalesViews {
            customer_year: self.customer_year_sales(transactions),
            products,
            top_products,
            category_year: self.category_year_sales(transactions),
            sub_category_year: self.sub_category_year_sales(transactions),
        };

        tracing::info!(
            transactions = transactions.len(),
            customer_years = views.customer_year.len(),
            products = views.products.len(),
            categories = views.category_year.len(),
            sub_categories = views.sub_category_year.len(),
            "Built sales views."
        );
        views
    }

    /// Groups by (customer, country, ship year) and sums every numeric column,
    /// largest sales first.
    pub fn customer_year_sales(&self, transactions: &[Transaction]) -> Vec<CustomerYearSales> {
        let mut groups: HashMap<(&str, &str, Year), CustomerYearSales> = HashMap::new();

        for tx in transactions {
            let key = (tx.customer_id.as_str(), tx.country.as_str(), tx.year());
            groups
                .entry(key)
                .or_insert_with(|| CustomerYearSales::empty(key.0, key.1, key.2))
                .add(tx);
        }

        let mut rows: Vec<CustomerYearSales> = groups.into_values().collect();
        // Equal sales fall back to the key so the order is reproducible.
        rows.sort_by(|a, b| {
            b.sales
                .cmp(&a.sales)
                .then_with(|| a.customer_id.cmp(&b.customer_id))
                .then_with(|| a.country.cmp(&b.country))
                .then_with(|| a.year.cmp(&b.year))
        });
        rows
    }

    /// Groups by product and sums sales, profit and quantity, ordered by
    /// (sales, profit, quantity) descending.
    pub fn product_totals(&self, transactions: &[Transaction]) -> Vec<ProductTotals> {
        let mut groups: HashMap<(&str, &str, &str, &str), ProductTotals> = HashMap::new();

        for tx in transactions {
            let key = (
                tx.product_id.as_str(),
                tx.category.as_str(),
                tx.sub_category.as_str(),
                tx.product_name.as_str(),
            );
            let totals = groups.entry(key).or_insert_with(|| ProductTotals {
                product_id: tx.product_id.clone(),
                category: tx.category.clone(),
                sub_category: tx.sub_category.clone(),
                product_name: tx.product_name.clone(),
                sales: Decimal::ZERO,
                profit: Decimal::ZERO,
                quantity: 0,
            });
            totals.sales += tx.sales;
            totals.profit += tx.profit;
            totals.quantity += tx.quantity;
        }

        let mut rows: Vec<ProductTotals> = groups.into_values().collect();
        rows.sort_by(|a, b| {
            b.sales
                .cmp(&a.sales)
                .then_with(|| b.profit.cmp(&a.profit))
                .then_with(|| b.quantity.cmp(&a.quantity))
                .then_with(|| a.product_id.cmp(&b.product_id))
                .then_with(|| a.product_name.cmp(&b.product_name))
        });
        rows
    }

    pub fn category_year_sales(&self, transactions: &[Transaction]) -> Vec<SegmentYearSales> {
        segment_year_sales(transactions, |tx| tx.category.as_str())
    }

    pub fn sub_category_year_sales(&self, transactions: &[Transaction]) -> Vec<SegmentYearSales> {
        segment_year_sales(transactions, |tx| tx.sub_category.as_str())
    }

    /// Pivots the leading `top_n` products of an already-sorted product view
    /// to long form: one (label, metric, value) row per product and metric.
    ///
    /// The output is ordered by label, not by sales rank, so the bar chart
    /// layout stays stable. Within one label `Sales` precedes `Profit`.
    pub fn top_products_long(&self, products: &[ProductTotals]) -> Vec<MetricRow> {
        let mut rows: Vec<MetricRow> = products
            .iter()
            .take(self.top_n)
            .flat_map(|product| {
                let label = product.label();
                Metric::ALL.into_iter().map(move |metric| MetricRow {
                    label: label.clone(),
                    metric,
                    value: match metric {
                        Metric::Sales => product.sales,
                        Metric::Profit => product.profit,
                    },
                })
            })
            .collect();

        rows.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.metric.cmp(&b.metric)));
        rows
    }
}

/// Sums sales per (segment, year), ordered by segment name then year.
fn segment_year_sales<F>(transactions: &[Transaction], segment: F) -> Vec<SegmentYearSales>
where
    F: Fn(&Transaction) -> &str,
{
    let mut totals: BTreeMap<(&str, Year), Decimal> = BTreeMap::new();
    for tx in transactions {
        *totals.entry((segment(tx), tx.year())).or_insert(Decimal::ZERO) += tx.sales;
    }

    totals
        .into_iter()
        .map(|((name, year), sales)| SegmentYearSales {
            name: name.to_string(),
            year,
            sales,
        })
        .collect()
}
