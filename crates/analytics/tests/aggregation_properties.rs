//! Property-based tests for the aggregation views.

use analytics::AnalyticsEngine;
use chrono::NaiveDate;
use core_types::{Metric, Transaction};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet, HashMap};

const CUSTOMERS: [&str; 5] = ["AA-10315", "BB-11020", "CC-12670", "DD-13570", "EE-14020"];
const COUNTRIES: [&str; 3] = ["United States", "France", "India"];
const SUB_CATEGORIES: [&str; 4] = ["Paper", "Phones", "Chairs", "Binders"];

/// (customer, country, year, product, sales cents, profit cents, quantity)
type RawLine = (usize, usize, i32, usize, i64, i64, i64);

fn line_strategy() -> impl Strategy<Value = RawLine> {
    (
        0..CUSTOMERS.len(),
        0..COUNTRIES.len(),
        2012i32..2017,
        0usize..25,
        0i64..2_000_000,
        -50_000i64..50_000,
        1i64..10,
    )
}

fn transactions_strategy(max_rows: usize) -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::vec(line_strategy(), 0..max_rows)
        .prop_map(|lines| lines.into_iter().map(to_transaction).collect())
}

fn to_transaction((customer, country, year, product, sales, profit, quantity): RawLine) -> Transaction {
    Transaction {
        customer_id: CUSTOMERS[customer].to_string(),
        country: COUNTRIES[country].to_string(),
        order_date: NaiveDate::from_ymd_opt(year, 6, 1).unwrap(),
        ship_date: NaiveDate::from_ymd_opt(year, 6, 5).unwrap(),
        postal_code: None,
        product_id: format!("PRD-{product:03}"),
        category: "Office Supplies".to_string(),
        sub_category: SUB_CATEGORIES[product % SUB_CATEGORIES.len()].to_string(),
        product_name: format!("Product {product}"),
        sales: Decimal::new(sales, 2),
        profit: Decimal::new(profit, 2),
        quantity,
        discount: Decimal::ZERO,
        shipping_cost: Decimal::ZERO,
    }
}

proptest! {
    /// Property: filtering the customer-year view to a year yields exactly the
    /// (customer, country) pairs shipped that year, with correct sums.
    #[test]
    fn customer_year_matches_brute_force(transactions in transactions_strategy(60)) {
        let rows = AnalyticsEngine::default().customer_year_sales(&transactions);

        let mut expected: HashMap<(String, String, i32), Decimal> = HashMap::new();
        for tx in &transactions {
            *expected
                .entry((tx.customer_id.clone(), tx.country.clone(), tx.year()))
                .or_insert(Decimal::ZERO) += tx.sales;
        }

        for year in 2012..2017 {
            let actual: BTreeMap<(String, String), Decimal> = rows
                .iter()
                .filter(|r| r.year == year)
                .map(|r| ((r.customer_id.clone(), r.country.clone()), r.sales))
                .collect();
            let wanted: BTreeMap<(String, String), Decimal> = expected
                .iter()
                .filter(|((_, _, y), _)| *y == year)
                .map(|((c, k, _), sales)| ((c.clone(), k.clone()), *sales))
                .collect();
            prop_assert_eq!(actual, wanted);
        }

        prop_assert!(rows.windows(2).all(|w| w[0].sales >= w[1].sales));
    }

    /// Property: adjacent product rows respect (sales, profit, quantity) descending.
    #[test]
    fn product_totals_are_ordered(transactions in transactions_strategy(80)) {
        let rows = AnalyticsEngine::default().product_totals(&transactions);
        for pair in rows.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(
                a.sales > b.sales
                    || (a.sales == b.sales && a.profit > b.profit)
                    || (a.sales == b.sales && a.profit == b.profit && a.quantity >= b.quantity)
            );
        }
    }

    /// Property: the long series has two rows per top product, is sorted by
    /// label, and its Sales rows give back each product's sales.
    #[test]
    fn top_products_round_trip(transactions in transactions_strategy(80)) {
        let engine = AnalyticsEngine::default();
        let products = engine.product_totals(&transactions);
        let rows = engine.top_products_long(&products);

        let distinct: BTreeSet<&str> = transactions.iter().map(|tx| tx.product_id.as_str()).collect();
        prop_assert_eq!(rows.len(), 2 * distinct.len().min(10));
        prop_assert!(rows.windows(2).all(|w| w[0].label <= w[1].label));

        let mut sales_by_label: HashMap<&str, Decimal> = HashMap::new();
        for row in rows.iter().filter(|r| r.metric == Metric::Sales) {
            *sales_by_label.entry(row.label.as_str()).or_insert(Decimal::ZERO) += row.value;
        }
        for product in products.iter().take(10) {
            prop_assert_eq!(sales_by_label.get(product.label().as_str()).copied(), Some(product.sales));
        }
    }
}
