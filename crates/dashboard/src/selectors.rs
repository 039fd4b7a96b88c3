//! One pure function per chart: (view, year) -> figure.

use crate::bands;
use crate::figure::{
    plot_value, Axis, Bar, BarMarker, Figure, Geo, GeoMarker, Layout, MarkerLine, Pie, PieMarker,
    ScatterGeo, Title, Trace,
};
use analytics::{CustomerYearSales, MetricRow, SegmentYearSales};
use core_types::{Metric, Year};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const CATEGORY_COLORS: [&str; 3] = ["#2dc2c2", "#f4b80f", "#de663e"];
// Plotly's qualitative T10 palette.
const SUB_CATEGORY_COLORS: [&str; 10] = [
    "#4C78A8", "#F58518", "#E45756", "#72B7B2", "#54A24B", "#EECA3B", "#B279A2", "#FF9DA6",
    "#9D755D", "#BAB0AC",
];
const PERCENT_TEMPLATE: &str = "%{percent:.1%}";
const PIE_WIDTH: u32 = 500;
const PIE_HEIGHT: u32 = 400;

/// A customer-year row reduced to what the map plots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySales {
    pub country: String,
    pub sales: Decimal,
}

/// Rows of `year`, projected to (country, sales), in view order.
///
/// Rows are not re-aggregated per country: a country with several customers
/// gets several markers.
pub fn country_sales_for_year(rows: &[CustomerYearSales], year: Year) -> Vec<CountrySales> {
    rows.iter()
        .filter(|row| row.year == year)
        .map(|row| CountrySales {
            country: row.country.clone(),
            sales: row.sales,
        })
        .collect()
}

/// Segments of `year`, ordered alphabetically by name.
pub fn segments_for_year(rows: &[SegmentYearSales], year: Year) -> Vec<SegmentYearSales> {
    let mut selected: Vec<SegmentYearSales> =
        rows.iter().filter(|row| row.year == year).cloned().collect();
    selected.sort_by(|a, b| a.name.cmp(&b.name));
    selected
}

/// Bubble map of sales by country, one layer per sales band.
pub fn world_map(rows: &[CustomerYearSales], year: Year) -> Figure {
    let countries = country_sales_for_year(rows, year);

    let data = bands::partition(&countries)
        .into_iter()
        .map(|layer| {
            Trace::ScatterGeo(ScatterGeo {
                name: layer.band.legend_label(),
                locationmode: "country names".to_string(),
                locations: layer.rows.iter().map(|r| r.country.clone()).collect(),
                hovertext: layer.rows.iter().map(|r| r.sales.round_dp(2).to_string()).collect(),
                hoverinfo: "all".to_string(),
                marker: GeoMarker {
                    size: layer.rows.iter().map(|r| plot_value(r.sales / Decimal::ONE_HUNDRED)).collect(),
                    color: layer.band.color.to_string(),
                    line: MarkerLine {
                        color: "rgb(40,40,40)".to_string(),
                        width: 0.5,
                    },
                    sizemode: "area".to_string(),
                },
            })
        })
        .collect();

    Figure {
        data,
        layout: Layout {
            showlegend: Some(true),
            geo: Some(Geo {
                scope: "world".to_string(),
                landcolor: "rgb(217, 217, 217)".to_string(),
            }),
            ..Layout::default()
        },
    }
}

/// Horizontal bars of the top products, one colour per metric.
///
/// Takes the long-form series as is; it already spans every year.
pub fn top_products_bar(rows: &[MetricRow]) -> Figure {
    let data = Metric::ALL
        .into_iter()
        .map(|metric| {
            let (labels, values): (Vec<String>, Vec<f64>) = rows
                .iter()
                .filter(|row| row.metric == metric)
                .map(|row| (row.label.clone(), plot_value(row.value)))
                .unzip();
            Trace::Bar(Bar {
                name: metric.to_string(),
                x: values,
                y: labels,
                orientation: "h".to_string(),
                marker: BarMarker {
                    color: metric_color(metric).to_string(),
                },
            })
        })
        .collect();

    Figure {
        data,
        layout: Layout {
            xaxis: Some(Axis { title: Title::new("Values") }),
            yaxis: Some(Axis { title: Title::new("Product ID & Sub-Category") }),
            barmode: Some("relative".to_string()),
            ..Layout::default()
        },
    }
}

pub fn category_pie(rows: &[SegmentYearSales], year: Year) -> Figure {
    segment_pie(&segments_for_year(rows, year), &CATEGORY_COLORS)
}

pub fn sub_category_pie(rows: &[SegmentYearSales], year: Year) -> Figure {
    segment_pie(&segments_for_year(rows, year), &SUB_CATEGORY_COLORS)
}

fn segment_pie(segments: &[SegmentYearSales], palette: &[&str]) -> Figure {
    Figure {
        data: vec![Trace::Pie(Pie {
            labels: segments.iter().map(|s| s.name.clone()).collect(),
            values: segments.iter().map(|s| plot_value(s.sales)).collect(),
            marker: PieMarker {
                colors: palette.iter().map(|c| c.to_string()).collect(),
            },
            texttemplate: PERCENT_TEMPLATE.to_string(),
            sort: false,
        })],
        layout: Layout {
            width: Some(PIE_WIDTH),
            height: Some(PIE_HEIGHT),
            ..Layout::default()
        },
    }
}

fn metric_color(metric: Metric) -> &'static str {
    match metric {
        Metric::Sales => "#ffaf4a",
        Metric::Profit => "#45b7c2",
    }
}
