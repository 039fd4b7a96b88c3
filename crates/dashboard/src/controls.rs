use crate::context::DashboardContext;
use crate::error::DashboardError;
use crate::figure::Figure;
use core_types::Year;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The interactive controls of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlId {
    /// Drives the world map and its caption.
    YearSlider,
    /// Drives both pie charts.
    YearDropdown,
}

/// The display areas a control can refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputId {
    WorldMap,
    WorldMapCaption,
    TopProductsBar,
    PieCategory,
    PieSubCategory,
}

/// New content for one output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputValue {
    Figure(Figure),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub output: OutputId,
    pub value: OutputValue,
}

pub type Recompute = fn(&DashboardContext, Year) -> OutputValue;

/// One edge of the dispatch table: a change of `control` recomputes `output`.
#[derive(Debug, Clone, Copy)]
pub struct Binding {
    pub control: ControlId,
    pub output: OutputId,
    pub recompute: Recompute,
}

/// Every control-to-output edge of the dashboard.
///
/// The top-products bar has no entry: it spans all years and never changes
/// after startup.
pub const BINDINGS: &[Binding] = &[
    Binding {
        control: ControlId::YearSlider,
        output: OutputId::WorldMap,
        recompute: recompute_world_map,
    },
    Binding {
        control: ControlId::YearSlider,
        output: OutputId::WorldMapCaption,
        recompute: recompute_world_map_caption,
    },
    Binding {
        control: ControlId::YearDropdown,
        output: OutputId::PieCategory,
        recompute: recompute_category_pie,
    },
    Binding {
        control: ControlId::YearDropdown,
        output: OutputId::PieSubCategory,
        recompute: recompute_sub_category_pie,
    },
];

fn recompute_world_map(ctx: &DashboardContext, year: Year) -> OutputValue {
    OutputValue::Figure(ctx.world_map(year))
}

fn recompute_world_map_caption(ctx: &DashboardContext, year: Year) -> OutputValue {
    OutputValue::Text(ctx.world_map_caption(year))
}

fn recompute_category_pie(ctx: &DashboardContext, year: Year) -> OutputValue {
    OutputValue::Figure(ctx.category_pie(year))
}

fn recompute_sub_category_pie(ctx: &DashboardContext, year: Year) -> OutputValue {
    OutputValue::Figure(ctx.sub_category_pie(year))
}

/// Handles one control change: runs every binding of `control` and returns
/// the refreshed outputs in table order.
///
/// A year with no data yields empty charts.
pub fn dispatch(ctx: &DashboardContext, control: ControlId, year: Year) -> Vec<Update> {
    if !ctx.has_year(year) {
        tracing::debug!(?control, year, "Year has no data; charts will be empty.");
    }

    let updates: Vec<Update> = BINDINGS
        .iter()
        .filter(|binding| binding.control == control)
        .map(|binding| Update {
            output: binding.output,
            value: (binding.recompute)(ctx, year),
        })
        .collect();

    tracing::debug!(?control, year, outputs = updates.len(), "Dispatched control change.");
    updates
}

impl ControlId {
    pub const ALL: [ControlId; 2] = [ControlId::YearSlider, ControlId::YearDropdown];

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlId::YearSlider => "year-slider",
            ControlId::YearDropdown => "year-dropdown",
        }
    }
}

impl FromStr for ControlId {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ControlId::ALL
            .into_iter()
            .find(|control| control.as_str() == s)
            .ok_or_else(|| DashboardError::UnknownControl(s.to_string()))
    }
}
