use crate::selectors::CountrySales;
use rust_decimal::Decimal;
use serde::Serialize;

/// A fixed sales-volume range of the world map, drawn in its own colour.
///
/// Ranges are lower-inclusive and upper-exclusive, except the last one which
/// also includes its upper bound. Every value in `[0, 30000]` therefore falls
/// in exactly one band; values outside it fall in none and are not drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SalesBand {
    pub low: i64,
    pub high: i64,
    pub color: &'static str,
    pub includes_high: bool,
}

pub const SALES_BANDS: [SalesBand; 4] = [
    SalesBand { low: 0, high: 1_000, color: "lightgrey", includes_high: false },
    SalesBand { low: 1_000, high: 5_000, color: "crimson", includes_high: false },
    SalesBand { low: 5_000, high: 10_000, color: "lightseagreen", includes_high: false },
    SalesBand { low: 10_000, high: 30_000, color: "royalblue", includes_high: true },
];

impl SalesBand {
    pub fn contains(&self, sales: Decimal) -> bool {
        let low = Decimal::from(self.low);
        let high = Decimal::from(self.high);
        sales >= low && (sales < high || (self.includes_high && sales == high))
    }

    /// Legend entry, e.g. `$1000 - $5000`.
    pub fn legend_label(&self) -> String {
        format!("${} - ${}", self.low, self.high)
    }

    /// Position of the band that claims `sales`, if any.
    pub fn index_of(sales: Decimal) -> Option<usize> {
        SALES_BANDS.iter().position(|band| band.contains(sales))
    }
}

/// One band with the rows that fall into it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandLayer {
    pub band: SalesBand,
    pub rows: Vec<CountrySales>,
}

/// Splits rows across the four bands, keeping their order within each band.
/// Always returns one layer per band, even when a layer is empty.
pub fn partition(rows: &[CountrySales]) -> Vec<BandLayer> {
    let mut layers: Vec<BandLayer> = SALES_BANDS
        .iter()
        .map(|band| BandLayer { band: *band, rows: Vec::new() })
        .collect();

    for row in rows {
        match SalesBand::index_of(row.sales) {
            Some(index) => layers[index].rows.push(row.clone()),
            None => tracing::debug!(country = %row.country, sales = %row.sales, "Sales outside every band; not drawn."),
        }
    }
    layers
}
