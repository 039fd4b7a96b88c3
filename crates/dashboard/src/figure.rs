use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A chart description in Plotly's JSON figure format.
///
/// Only the attributes the dashboard sets are modelled; everything else is
/// left to the renderer's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

/// One layer of a figure. Serialises with Plotly's `type` discriminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    ScatterGeo(ScatterGeo),
    Bar(Bar),
    Pie(Pie),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterGeo {
    pub name: String,
    pub locationmode: String,
    pub locations: Vec<String>,
    pub hovertext: Vec<String>,
    pub hoverinfo: String,
    pub marker: GeoMarker,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoMarker {
    pub size: Vec<f64>,
    pub color: String,
    pub line: MarkerLine,
    pub sizemode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerLine {
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<String>,
    pub orientation: String,
    pub marker: BarMarker,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarMarker {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pie {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub marker: PieMarker,
    pub texttemplate: String,
    /// Keep slices in the order given instead of re-sorting by value.
    pub sort: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieMarker {
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    pub scope: String,
    pub landcolor: String,
}

/// Plot coordinates are floats; totals are exact decimals until this point.
pub(crate) fn plot_value(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}
