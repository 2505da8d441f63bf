//! HTTP handler functions for the housing map.

use actix_web::{HttpRequest, HttpResponse, web};
use housing_map_affordability::handle_event;
use housing_map_district_models::RequestState;
use housing_map_server_models::{ApiDashboard, ApiHealth, DashboardQueryParams};

use crate::{AppState, page};

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        districts: state.context.districts().len(),
        boundaries: state.context.boundaries().len(),
    })
}

/// Parses the dashboard query string. A malformed query, such as a repeated
/// `salary`, counts as no input rather than a client error.
fn query_params(req: &HttpRequest) -> DashboardQueryParams {
    web::Query::<DashboardQueryParams>::from_query(req.query_string()).map_or_else(
        |e| {
            log::debug!("Ignoring malformed dashboard query: {e}");
            DashboardQueryParams::default()
        },
        web::Query::into_inner,
    )
}

/// `GET /api/dashboard`
///
/// Recomputes the dashboard for the submitted salary or reset action.
pub async fn dashboard(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let params = query_params(&req);
    let event = RequestState::from(&params).event();
    let view = handle_event(&state.context, event);

    HttpResponse::Ok().json(ApiDashboard::from(view))
}

/// `GET /`
///
/// Renders the dashboard page for the submitted salary or reset action.
pub async fn index(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let params = query_params(&req);
    let event = RequestState::from(&params).event();
    let view = handle_event(&state.context, event);

    match page::render(&view, params.salary_input()) {
        Ok(markup) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(markup.into_string()),
        Err(e) => {
            log::error!("Failed to render dashboard page: {e}");
            HttpResponse::InternalServerError().body("Failed to render dashboard")
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test};
    use housing_map_affordability::DataContext;
    use housing_map_district_models::DistrictRecord;

    use super::*;

    const BOUNDARIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "LAD23CD": "A" },
                "geometry": { "type": "Polygon", "coordinates": [[[0.0, 51.0], [1.0, 51.0], [1.0, 52.0], [0.0, 51.0]]] }
            },
            {
                "type": "Feature",
                "properties": { "LAD23CD": "B" },
                "geometry": { "type": "Polygon", "coordinates": [[[1.0, 51.0], [2.0, 51.0], [2.0, 52.0], [1.0, 51.0]]] }
            }
        ]
    }"#;

    fn state() -> web::Data<AppState> {
        let context = DataContext::new(
            vec![
                DistrictRecord::new("A", "Alpha", Some(300_000.0), Some(40_000.0), Some(7.5)),
                DistrictRecord::new("B", "Beta", Some(150_000.0), Some(30_000.0), Some(5.0)),
            ],
            housing_map_geography::parse_boundaries(BOUNDARIES, "LAD23CD").unwrap(),
        );
        web::Data::new(AppState { context })
    }

    #[actix_web::test]
    async fn health_reports_loaded_data() {
        let app = test::init_service(App::new().app_data(state()).configure(crate::routes)).await;
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: ApiHealth = test::call_and_read_body_json(&app, req).await;

        assert!(body.healthy);
        assert_eq!(body.districts, 2);
        assert_eq!(body.boundaries, 2);
    }

    #[actix_web::test]
    async fn dashboard_applies_salary() {
        let app = test::init_service(App::new().app_data(state()).configure(crate::routes)).await;
        let req = test::TestRequest::get()
            .uri("/api/dashboard?salary=50000")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            body["title"],
            "Housing Affordability Index for a Salary of £50,000"
        );
        assert_eq!(body["customSalary"], 50_000.0);
        assert_eq!(body["warning"]["visible"], false);
        assert_eq!(body["mostAffordable"][0]["name"], "Beta");
        assert_eq!(body["mostAffordable"][0]["affordabilityIndex"], "3.00");
        assert_eq!(body["leastAffordable"][0]["affordabilityIndex"], "6.00");
        assert_eq!(
            body["choropleth"]["features"][0]["properties"]["band"],
            "Affordable"
        );
        assert_eq!(body["legend"].as_array().unwrap().len(), 4);
    }

    #[actix_web::test]
    async fn dashboard_warns_on_negative_salary() {
        let app = test::init_service(App::new().app_data(state()).configure(crate::routes)).await;
        let req = test::TestRequest::get()
            .uri("/api/dashboard?salary=-100")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["warning"]["visible"], true);
        assert!(
            body["warning"]["message"]
                .as_str()
                .unwrap()
                .contains("valid salary greater than £0")
        );
        assert_eq!(body["leastAffordable"][0]["affordabilityIndex"], "7.50");
        assert_eq!(body["customSalary"], serde_json::Value::Null);
    }

    #[actix_web::test]
    async fn dashboard_reset_ignores_salary() {
        let app = test::init_service(App::new().app_data(state()).configure(crate::routes)).await;
        let req = test::TestRequest::get()
            .uri("/api/dashboard?salary=50000&reset=1")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["warning"]["visible"], false);
        assert_eq!(body["mostAffordable"][0]["affordabilityIndex"], "5.00");
        assert_eq!(body["leastAffordable"][0]["affordabilityIndex"], "7.50");
    }

    #[actix_web::test]
    async fn index_renders_page() {
        let app = test::init_service(App::new().app_data(state()).configure(crate::routes)).await;
        let req = test::TestRequest::get().uri("/?salary=-100").to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        let body = test::read_body(resp).await;
        let html = std::str::from_utf8(&body).unwrap();

        assert!(html.contains("valid salary greater than £0"));
        assert!(html.contains("Most Affordable Districts"));
        assert!(html.contains("Alpha"));
        assert!(html.contains(r#"id="choropleth-data""#));
        assert!(html.contains(r#"value="-100""#));
    }

    #[actix_web::test]
    async fn repeated_salary_counts_as_no_salary() {
        let app = test::init_service(App::new().app_data(state()).configure(crate::routes)).await;
        let req = test::TestRequest::get()
            .uri("/api/dashboard?salary=1&salary=2")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["warning"]["visible"], false);
        assert_eq!(body["customSalary"], serde_json::Value::Null);
        assert_eq!(body["leastAffordable"][0]["affordabilityIndex"], "7.50");

        let req = test::TestRequest::get().uri("/?salary=1&salary=2").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }
}
