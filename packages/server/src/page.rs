//! Server-rendered dashboard page.
//!
//! The salary form submits on change (or on Enter) and the reset button,
//! in a form of its own, submits `reset=1`, so every interaction is a plain `GET /` that re-renders the
//! page from the query string. The map is drawn client-side with Leaflet
//! from the choropleth `GeoJSON` embedded in the page.

use housing_map_affordability::{DashboardView, RankingRow};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde::Serialize;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

const MAP_SCRIPT: &str = r"
const data = JSON.parse(document.getElementById('choropleth-data').textContent);
const map = L.map('map');
L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', {
  maxZoom: 12,
  attribution: '&copy; OpenStreetMap contributors',
}).addTo(map);
const layer = L.geoJSON(data.features, {
  style: (f) => ({ fillColor: f.properties.color, fillOpacity: 0.7, color: '#555', weight: 0.5 }),
  onEachFeature: (f, l) => l.bindTooltip(f.properties.hover, { sticky: true }),
}).addTo(map);
if (data.bounds) {
  map.fitBounds([[data.bounds.south, data.bounds.west], [data.bounds.north, data.bounds.east]]);
} else {
  map.setView([52.5, -1.5], 6);
}
";

/// Map payload embedded in the page.
#[derive(Serialize)]
struct MapData<'a> {
    features: &'a geojson::FeatureCollection,
    bounds: Option<housing_map_geography::MapBounds>,
}

/// Renders the full dashboard page.
///
/// # Errors
///
/// Returns an error if the map payload cannot be serialized.
pub fn render(view: &DashboardView, salary_input: &str) -> Result<Markup, serde_json::Error> {
    let map_data = serde_json::to_string(&MapData {
        features: &view.map.features,
        bounds: view.map.bounds,
    })?
    // Keep the payload from closing its own script element.
    .replace("</", "<\\/");

    Ok(html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Housing Affordability in England and Wales" }
                link rel="stylesheet" href=(LEAFLET_CSS);
                script src=(LEAFLET_JS) {}
            }
            body {
                main {
                    h1 { "Housing Affordability in England and Wales" }

                    // Out-of-range salaries must reach the server to raise the
                    // warning, so the input carries no `min`/`step` limits.
                    form id="salary-form" method="get" action="/" {
                        label for="salary" { "Enter your annual salary (£): " }
                        input
                            id="salary"
                            type="number"
                            name="salary"
                            value=(salary_input)
                            onchange="this.form.submit()";
                    }
                    form id="reset-form" method="get" action="/" {
                        button type="submit" name="reset" value="1" formnovalidate { "Reset" }
                    }

                    @if view.warning_visible {
                        div class="alert" role="alert" {
                            span { (view.warning) }
                            " "
                            button
                                type="button"
                                aria-label="Dismiss"
                                onclick="this.parentElement.remove()"
                            { "×" }
                        }
                    }

                    section {
                        h2 { (view.map.title) }
                        div id="map" style="height: 640px;" {}
                        ul class="legend" {
                            @for entry in &view.map.legend {
                                li {
                                    span style={ "display:inline-block;width:1em;height:1em;background:" (entry.color) } {}
                                    " " (entry.label)
                                }
                            }
                        }
                    }

                    (ranking_table("Most Affordable Districts", &view.most_affordable))
                    (ranking_table("Least Affordable Districts", &view.least_affordable))
                }

                script id="choropleth-data" type="application/json" { (PreEscaped(map_data)) }
                script { (PreEscaped(MAP_SCRIPT)) }
            }
        }
    })
}

fn ranking_table(heading: &str, rows: &[RankingRow]) -> Markup {
    html! {
        section {
            h3 { (heading) }
            table {
                thead {
                    tr {
                        th { "District" }
                        th { "Median House Price" }
                        th { "Median Salary" }
                        th { "Affordability Index" }
                    }
                }
                tbody {
                    @for row in rows {
                        tr {
                            td { (row.name) }
                            td { (row.house_price) }
                            td { (row.salary) }
                            td { (row.affordability_index) }
                        }
                    }
                }
            }
        }
    }
}
