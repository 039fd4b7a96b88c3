use crate::context::DashboardContext;
use crate::controls::{dispatch, ControlId, OutputId, OutputValue, Update};
use core_types::Year;
use serde::Serialize;
use std::collections::BTreeMap;

pub const DASHBOARD_TITLE: &str = "Exploring Worldwide Retail Trends: Global Superstore";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderSpec {
    pub id: ControlId,
    pub min: Year,
    pub max: Year,
    pub value: Year,
    pub step: u32,
    /// Tick labels keyed by year.
    pub marks: BTreeMap<Year, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownSpec {
    pub id: ControlId,
    pub options: Vec<Year>,
    pub value: Year,
}

/// Everything a client needs to render the first screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardLayout {
    pub title: &'static str,
    pub year_slider: SliderSpec,
    pub year_dropdown: DropdownSpec,
    /// Initial content of every output: the static bar chart followed by the
    /// outputs of both controls at the initial year.
    pub updates: Vec<Update>,
}

/// Builds the first screen. Returns `None` when the data holds no years,
/// since neither control would have a domain.
pub fn initial_layout(ctx: &DashboardContext) -> Option<DashboardLayout> {
    let years = ctx.years();
    let initial = ctx.initial_year()?;
    let max = years.last().copied().unwrap_or(initial);

    let mut updates = vec![Update {
        output: OutputId::TopProductsBar,
        value: OutputValue::Figure(ctx.top_products_bar()),
    }];
    updates.extend(dispatch(ctx, ControlId::YearSlider, initial));
    updates.extend(dispatch(ctx, ControlId::YearDropdown, initial));

    Some(DashboardLayout {
        title: DASHBOARD_TITLE,
        year_slider: SliderSpec {
            id: ControlId::YearSlider,
            min: initial,
            max,
            value: initial,
            step: 1,
            marks: years.iter().map(|year| (*year, year.to_string())).collect(),
        },
        year_dropdown: DropdownSpec {
            id: ControlId::YearDropdown,
            options: years.to_vec(),
            value: initial,
        },
        updates,
    })
}
