use crate::error::LoadError;

/// Header names as they appear in the Global Superstore `Orders` sheet.
pub const CUSTOMER_ID: &str = "Customer ID";
pub const COUNTRY: &str = "Country";
pub const ORDER_DATE: &str = "Order Date";
pub const SHIP_DATE: &str = "Ship Date";
pub const POSTAL_CODE: &str = "Postal Code";
pub const PRODUCT_ID: &str = "Product ID";
pub const CATEGORY: &str = "Category";
pub const SUB_CATEGORY: &str = "Sub-Category";
pub const PRODUCT_NAME: &str = "Product Name";
pub const SALES: &str = "Sales";
pub const PROFIT: &str = "Profit";
pub const QUANTITY: &str = "Quantity";
pub const DISCOUNT: &str = "Discount";
pub const SHIPPING_COST: &str = "Shipping Cost";

/// Positions of the columns the loader reads, resolved from the header row.
///
/// Headers match case-insensitively and ignore punctuation and spacing, so
/// `Sub-Category`, `sub_category` and `SubCategory` are the same column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub customer_id: usize,
    pub country: usize,
    pub order_date: usize,
    pub ship_date: usize,
    pub postal_code: usize,
    pub product_id: usize,
    pub category: usize,
    pub sub_category: usize,
    pub product_name: usize,
    pub sales: usize,
    pub profit: usize,
    pub quantity: usize,
    pub discount: Option<usize>,
    pub shipping_cost: Option<usize>,
}

impl ColumnMap {
    pub fn from_headers<I, S>(headers: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let normalized: Vec<String> = headers
            .into_iter()
            .map(|header| normalize(header.as_ref()))
            .collect();

        let find = |name: &'static str| {
            let wanted = normalize(name);
            normalized.iter().position(|header| *header == wanted)
        };
        let require = |name: &'static str| find(name).ok_or(LoadError::MissingColumn(name));

        Ok(Self {
            customer_id: require(CUSTOMER_ID)?,
            country: require(COUNTRY)?,
            order_date: require(ORDER_DATE)?,
            ship_date: require(SHIP_DATE)?,
            postal_code: require(POSTAL_CODE)?,
            product_id: require(PRODUCT_ID)?,
            category: require(CATEGORY)?,
            sub_category: require(SUB_CATEGORY)?,
            product_name: require(PRODUCT_NAME)?,
            sales: require(SALES)?,
            profit: require(PROFIT)?,
            quantity: require(QUANTITY)?,
            discount: find(DISCOUNT),
            shipping_cost: find(SHIPPING_COST),
        })
    }
}

fn normalize(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADERS: [&str; 14] = [
        "Row ID",
        "Order Date",
        "Ship Date",
        "Customer ID",
        "Postal Code",
        "Country",
        "Product ID",
        "Category",
        "Sub-Category",
        "Product Name",
        "Sales",
        "Quantity",
        "Discount",
        "Profit",
    ];

    #[test]
    fn resolves_positions_by_name() {
        let map = ColumnMap::from_headers(HEADERS).unwrap();
        assert_eq!(map.order_date, 1);
        assert_eq!(map.customer_id, 3);
        assert_eq!(map.sub_category, 8);
        assert_eq!(map.profit, 13);
        assert_eq!(map.discount, Some(12));
        assert_eq!(map.shipping_cost, None);
    }

    #[test]
    fn ignores_case_and_punctuation() {
        let headers = HEADERS.map(|h| h.to_ascii_lowercase().replace([' ', '-'], "_"));
        let map = ColumnMap::from_headers(&headers).unwrap();
        assert_eq!(map.sub_category, 8);
    }

    #[test]
    fn reports_the_missing_column() {
        let err = ColumnMap::from_headers(&HEADERS[..10]).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(SALES)));
    }
}
