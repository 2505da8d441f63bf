#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the housing map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the dashboard view types to allow independent evolution of the API
//! contract.

use geojson::FeatureCollection;
use housing_map_affordability::{DashboardView, LegendEntry, RankingRow};
use housing_map_district_models::RequestState;
use housing_map_geography::MapBounds;
use serde::{Deserialize, Serialize};

/// Query parameters shared by the page and the dashboard endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQueryParams {
    /// Annual salary as typed into the salary input.
    pub salary: Option<String>,
    /// Present (non-empty) when the reset button was clicked.
    pub reset: Option<String>,
}

impl DashboardQueryParams {
    /// The salary value to echo back into the salary input.
    #[must_use]
    pub fn salary_input(&self) -> &str {
        if self.is_reset() {
            return "";
        }
        self.salary.as_deref().map_or("", str::trim)
    }

    fn is_reset(&self) -> bool {
        self.reset.as_deref().is_some_and(|r| !r.trim().is_empty())
    }
}

impl From<&DashboardQueryParams> for RequestState {
    /// An empty or unparseable salary counts as no salary, the same as an
    /// empty numeric input.
    fn from(params: &DashboardQueryParams) -> Self {
        let user_salary = params
            .salary
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<f64>().ok());

        Self {
            user_salary,
            reset_requested: params.is_reset(),
        }
    }
}

/// A row in one of the ranking tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRankingRow {
    /// District code.
    pub code: String,
    /// District name.
    pub name: String,
    /// Formatted median house price.
    pub house_price: String,
    /// Formatted median salary.
    pub salary: String,
    /// Formatted affordability index.
    pub affordability_index: String,
}

impl From<RankingRow> for ApiRankingRow {
    fn from(row: RankingRow) -> Self {
        Self {
            code: row.code,
            name: row.name,
            house_price: row.house_price,
            salary: row.salary,
            affordability_index: row.affordability_index,
        }
    }
}

/// Validation warning banner state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiWarning {
    /// Warning text; empty when hidden.
    pub message: String,
    /// Whether the banner is shown.
    pub visible: bool,
}

/// Full dashboard state for one interaction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDashboard {
    /// Map title.
    pub title: String,
    /// Salary applied to the map, if a valid one was entered.
    pub custom_salary: Option<f64>,
    /// Warning banner.
    pub warning: ApiWarning,
    /// Five most affordable districts.
    pub most_affordable: Vec<ApiRankingRow>,
    /// Five least affordable districts.
    pub least_affordable: Vec<ApiRankingRow>,
    /// Band legend.
    pub legend: Vec<LegendEntry>,
    /// Extent of the boundaries.
    pub bounds: Option<MapBounds>,
    /// District features colored by band.
    pub choropleth: FeatureCollection,
}

impl From<DashboardView> for ApiDashboard {
    fn from(view: DashboardView) -> Self {
        Self {
            title: view.map.title,
            custom_salary: view.custom_salary,
            warning: ApiWarning {
                message: view.warning,
                visible: view.warning_visible,
            },
            most_affordable: view
                .most_affordable
                .into_iter()
                .map(ApiRankingRow::from)
                .collect(),
            least_affordable: view
                .least_affordable
                .into_iter()
                .map(ApiRankingRow::from)
                .collect(),
            legend: view.map.legend,
            bounds: view.map.bounds,
            choropleth: view.map.features,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Number of districts in the loaded dataset.
    pub districts: usize,
    /// Number of loaded district boundaries.
    pub boundaries: usize,
}
