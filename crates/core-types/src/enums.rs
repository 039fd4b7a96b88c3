use serde::{Deserialize, Serialize};
use std::fmt;

/// The measures shown side by side in the top-products chart.
///
/// The declaration order is also the display order within one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metric {
    Sales,
    Profit,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Sales, Metric::Profit];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Sales => "Sales",
            Metric::Profit => "Profit",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sales_sorts_before_profit() {
        let mut metrics = vec![Metric::Profit, Metric::Sales];
        metrics.sort();
        assert_eq!(metrics, Metric::ALL.to_vec());
    }

    #[test]
    fn displays_as_the_chart_legend_name() {
        let names: Vec<String> = Metric::ALL.iter().map(Metric::to_string).collect();
        assert_eq!(names, ["Sales", "Profit"]);
    }
}
