use crate::figure::Figure;
use crate::selectors;
use analytics::{AnalyticsEngine, SalesViews};
use core_types::{Transaction, Year};

/// The read-only state every chart is recomputed from.
///
/// Built once during initialisation; interactions only ever borrow it.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    views: SalesViews,
    years: Vec<Year>,
}

impl DashboardContext {
    pub fn new(views: SalesViews) -> Self {
        let years = views.years();
        Self { views, years }
    }

    pub fn from_transactions(engine: &AnalyticsEngine, transactions: &[Transaction]) -> Self {
        Self::new(engine.build(transactions))
    }

    pub fn views(&self) -> &SalesViews {
        &self.views
    }

    /// The domain of both year controls, ascending.
    pub fn years(&self) -> &[Year] {
        &self.years
    }

    /// The controls start on the earliest year.
    pub fn initial_year(&self) -> Option<Year> {
        self.years.first().copied()
    }

    pub fn has_year(&self, year: Year) -> bool {
        self.years.binary_search(&year).is_ok()
    }

    pub fn world_map(&self, year: Year) -> Figure {
        selectors::world_map(&self.views.customer_year, year)
    }

    pub fn world_map_caption(&self, year: Year) -> String {
        format!("Total Sales by Country in {}", year)
    }

    pub fn top_products_bar(&self) -> Figure {
        selectors::top_products_bar(&self.views.top_products)
    }

    pub fn category_pie(&self, year: Year) -> Figure {
        selectors::category_pie(&self.views.category_year, year)
    }

    pub fn sub_category_pie(&self, year: Year) -> Figure {
        selectors::sub_category_pie(&self.views.sub_category_year, year)
    }
}
