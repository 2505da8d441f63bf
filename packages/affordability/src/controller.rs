//! The dashboard's single reactive handler.

use housing_map_district_models::DashboardEvent;

use crate::context::DataContext;
use crate::map::{self, ChoroplethMap};
use crate::ranking::{self, RANKING_SIZE, RankingRow};
use crate::recompute::recompute;

/// Everything the page shows after one interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// The choropleth map.
    pub map: ChoroplethMap,
    /// Five lowest-index districts.
    pub most_affordable: Vec<RankingRow>,
    /// Five highest-index districts.
    pub least_affordable: Vec<RankingRow>,
    /// Warning text; empty when there is nothing to warn about.
    pub warning: String,
    /// Whether the warning banner is shown.
    pub warning_visible: bool,
    /// Salary applied to the map, when a valid one was entered.
    pub custom_salary: Option<f64>,
}

/// Runs one recompute-and-render cycle against the shared base dataset.
#[must_use]
pub fn handle_event(context: &DataContext, event: DashboardEvent) -> DashboardView {
    let recomputed = recompute(context.districts(), event);
    let map = map::render(
        &recomputed.districts,
        context.boundaries(),
        recomputed.custom_salary,
    );
    let rankings = ranking::rank(&recomputed.districts, RANKING_SIZE);

    DashboardView {
        map,
        most_affordable: rankings.most_affordable,
        least_affordable: rankings.least_affordable,
        warning: recomputed.warning.unwrap_or_default().to_owned(),
        warning_visible: recomputed.warning.is_some(),
        custom_salary: recomputed.custom_salary,
    }
}
