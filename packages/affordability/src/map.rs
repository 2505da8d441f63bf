//! Choropleth rendering.
//!
//! Joins the recomputed districts to their boundaries and produces a
//! `GeoJSON` `FeatureCollection` whose feature properties carry the band,
//! fill color and hover text the page needs to draw the map.

use geojson::{Feature, FeatureCollection, JsonObject, feature::Id};
use housing_map_district_models::{AffordabilityBand, DistrictRecord, UNBANDED_COLOR};
use housing_map_geography::{BoundaryCollection, MapBounds};
use maud::html;
use serde::Serialize;
use serde_json::Value;

use crate::format;

/// Title used when the pre-computed index is shown.
pub const DEFAULT_TITLE: &str = "Housing Affordability Index by Local Authority District";

/// One entry in the band legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    /// Band label, e.g. "Very Affordable".
    pub label: String,
    /// Fill color for the band.
    pub color: &'static str,
}

/// A renderable choropleth map.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoroplethMap {
    /// Map title.
    pub title: String,
    /// One feature per district that has a boundary, in dataset order.
    pub features: FeatureCollection,
    /// Band legend, most affordable first.
    pub legend: Vec<LegendEntry>,
    /// Extent of all boundaries, for fitting the view.
    pub bounds: Option<MapBounds>,
}

/// Map title, embedding the salary when a custom one is active.
#[must_use]
pub fn title(custom_salary: Option<f64>) -> String {
    custom_salary.map_or_else(
        || DEFAULT_TITLE.to_owned(),
        |salary| {
            format!(
                "Housing Affordability Index for a Salary of {}",
                format::currency(Some(salary))
            )
        },
    )
}

/// Hover text for a district. Lines are separated with `<br>`; the district
/// name is HTML-escaped.
#[must_use]
pub fn hover_text(district: &DistrictRecord) -> String {
    format!(
        "{}<br>Affordability Index: {}<br>Median House Price: {}<br>Median Salary: {}",
        html! { (district.name) }.into_string(),
        format::index(district.affordability_index),
        format::currency(district.median_house_price),
        format::currency(district.median_salary),
    )
}

/// Band legend in band order.
#[must_use]
pub fn legend() -> Vec<LegendEntry> {
    AffordabilityBand::all()
        .iter()
        .map(|band| LegendEntry {
            label: band.to_string(),
            color: band.color(),
        })
        .collect()
}

/// Renders the choropleth for a recomputed dataset.
///
/// Districts whose code has no boundary are omitted.
#[must_use]
pub fn render(
    districts: &[DistrictRecord],
    boundaries: &BoundaryCollection,
    custom_salary: Option<f64>,
) -> ChoroplethMap {
    let features: Vec<Feature> = districts
        .iter()
        .filter_map(|district| {
            let geometry = boundaries.geometry(&district.code)?;
            Some(Feature {
                bbox: None,
                geometry: Some(geometry.clone()),
                id: Some(Id::String(district.code.clone())),
                properties: Some(properties(district)),
                foreign_members: None,
            })
        })
        .collect();

    log::debug!(
        "Rendered {} of {} districts",
        features.len(),
        districts.len()
    );

    ChoroplethMap {
        title: title(custom_salary),
        features: FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        },
        legend: legend(),
        bounds: boundaries.bounds(),
    }
}

fn properties(district: &DistrictRecord) -> JsonObject {
    let band = district.band();

    let mut props = JsonObject::new();
    props.insert("code".to_owned(), Value::from(district.code.clone()));
    props.insert("name".to_owned(), Value::from(district.name.clone()));
    props.insert(
        "band".to_owned(),
        band.map_or(Value::Null, |b| Value::from(b.to_string())),
    );
    props.insert(
        "color".to_owned(),
        Value::from(band.map_or(UNBANDED_COLOR, AffordabilityBand::color)),
    );
    props.insert(
        "affordabilityIndex".to_owned(),
        district
            .affordability_index
            .filter(|i| i.is_finite())
            .map_or(Value::Null, Value::from),
    );
    props.insert("hover".to_owned(), Value::from(hover_text(district)));
    props
}
