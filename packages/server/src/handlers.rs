//! HTTP handler functions for the fieldscan API.

use actix_web::{HttpResponse, web};
use fieldscan_report_models::ComplianceStatus;
use fieldscan_server_models::{
    ApiHealth, ApiReport, AppliedClusterParams, ClusterAnalysisResponse, ComplianceClusterParams,
    NoDataResponse, ReportQueryParams,
};
use fieldscan_store::ReportQuery;

use crate::AppState;

/// Default neighborhood radius when `maxDistance` is not supplied.
const DEFAULT_MAX_DISTANCE_KM: f64 = 1000.0;
/// Default cluster seed size when `minPoints` is not supplied.
const DEFAULT_MIN_POINTS: usize = 3;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/reports`
///
/// Lists compliance reports with agent, status, and pagination filters.
pub async fn reports(
    state: web::Data<AppState>,
    params: web::Query<ReportQueryParams>,
) -> HttpResponse {
    let status = match params.status.as_deref() {
        None => None,
        Some(raw) => match raw.trim().parse::<ComplianceStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                return HttpResponse::BadRequest().json(serde_json::json!({
                    "error": format!("Unknown status '{raw}'"),
                }));
            }
        },
    };

    let query = ReportQuery {
        agent_id: params.agent_id.clone(),
        status,
        geolocated_only: false,
        limit: Some(params.limit.unwrap_or(100)),
        offset: params.offset.unwrap_or(0),
    };

    match state.store.list_reports(&query).await {
        Ok(rows) => {
            let api_reports: Vec<ApiReport> = rows.into_iter().map(ApiReport::from).collect();
            HttpResponse::Ok().json(api_reports)
        }
        Err(e) => {
            log::error!("Failed to query reports: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to query reports"
            }))
        }
    }
}

/// `GET /api/analytics/compliance-clusters`
///
/// Runs the geospatial clustering analysis over geolocated reports,
/// optionally narrowed to one agent. Parameter violations answer 400; an
/// empty report set answers a fixed no-data payload without invoking the
/// engine; engine and store failures answer 500 with the underlying
/// message attached.
pub async fn compliance_clusters(
    state: web::Data<AppState>,
    params: web::Query<ComplianceClusterParams>,
) -> HttpResponse {
    let max_distance = params.max_distance.unwrap_or(DEFAULT_MAX_DISTANCE_KM);
    let min_points = params.min_points.unwrap_or(DEFAULT_MIN_POINTS);

    if !max_distance.is_finite() || max_distance <= 0.0 {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": "maxDistance must be a positive number of kilometers",
        }));
    }
    if min_points < 1 {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": "minPoints must be at least 1",
        }));
    }

    let query = ReportQuery {
        agent_id: params.agent_id.clone(),
        geolocated_only: true,
        ..ReportQuery::default()
    };

    let reports = match state.store.list_reports(&query).await {
        Ok(reports) => reports,
        Err(e) => {
            log::error!("Failed to load reports for analysis: {e}");
            return analysis_failure(&e.to_string());
        }
    };

    if reports.is_empty() {
        return HttpResponse::Ok().json(NoDataResponse::new());
    }

    match fieldscan_analytics::analyze(reports, max_distance, min_points) {
        Ok(data) => HttpResponse::Ok().json(ClusterAnalysisResponse {
            success: true,
            data,
            parameters: AppliedClusterParams {
                max_distance_km: max_distance,
                min_points,
                agent_id: params.agent_id.clone(),
            },
        }),
        Err(e) => {
            log::error!("Compliance analysis failed: {e}");
            analysis_failure(&e.to_string())
        }
    }
}

fn analysis_failure(message: &str) -> HttpResponse {
    HttpResponse::InternalServerError().json(serde_json::json!({
        "success": false,
        "error": "Failed to perform compliance analysis",
        "message": message,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test};
    use chrono::Utc;
    use fieldscan_report_models::ComplianceReport;
    use fieldscan_store::InMemoryReportStore;
    use uuid::Uuid;

    use super::*;

    fn report(
        agent: &str,
        status: ComplianceStatus,
        coords: Option<(f64, f64)>,
    ) -> ComplianceReport {
        ComplianceReport {
            id: Uuid::new_v4(),
            agent_id: agent.to_string(),
            status,
            reason: None,
            latitude: coords.map(|(lat, _)| lat),
            longitude: coords.map(|(_, lng)| lng),
            scanned_data: None,
            created_at: Utc::now(),
        }
    }

    /// Three reports clustered within ~50 m, plus one far-away report
    /// from a second agent and one without coordinates.
    fn fixture() -> Vec<ComplianceReport> {
        vec![
            report("agent-1", ComplianceStatus::Compliant, Some((41.8781, -87.6298))),
            report("agent-1", ComplianceStatus::NonCompliant, Some((41.8785, -87.6300))),
            report("agent-1", ComplianceStatus::Compliant, Some((41.8779, -87.6295))),
            report("agent-2", ComplianceStatus::Fraudulent, Some((45.0, -93.0))),
            report("agent-2", ComplianceStatus::Compliant, None),
        ]
    }

    async fn call(
        reports: Vec<ComplianceReport>,
        uri: &str,
    ) -> (actix_web::http::StatusCode, serde_json::Value) {
        let state = web::Data::new(AppState {
            store: Arc::new(InMemoryReportStore::new(reports)),
        });
        let app = test::init_service(
            App::new().app_data(state).service(
                web::scope("/api")
                    .route("/health", web::get().to(health))
                    .route("/reports", web::get().to(self::reports))
                    .route(
                        "/analytics/compliance-clusters",
                        web::get().to(compliance_clusters),
                    ),
            ),
        )
        .await;

        let request = test::TestRequest::get().uri(uri).to_request();
        let response = test::call_service(&app, request).await;
        let status = response.status();
        let body: serde_json::Value = test::read_body_json(response).await;
        (status, body)
    }

    #[actix_web::test]
    async fn health_reports_service_identity() {
        let (status, body) = call(Vec::new(), "/api/health").await;
        assert_eq!(status, 200);
        assert_eq!(body["healthy"], true);
        assert_eq!(body["service"], "fieldscan_server");
    }

    #[actix_web::test]
    async fn clusters_happy_path() {
        let uri = "/api/analytics/compliance-clusters?maxDistance=1&minPoints=3";
        let (status, body) = call(fixture(), uri).await;
        assert_eq!(status, 200);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["summary"]["totalPoints"], 4);
        assert_eq!(body["data"]["summary"]["clusterCount"], 1);
        assert_eq!(body["data"]["summary"]["noiseCount"], 1);
        assert_eq!(body["data"]["clusters"][0]["size"], 3);
        assert_eq!(body["parameters"]["maxDistanceKm"], 1.0);
        assert_eq!(body["parameters"]["minPoints"], 3);
    }

    #[actix_web::test]
    async fn clusters_defaults_applied() {
        let (status, body) = call(fixture(), "/api/analytics/compliance-clusters").await;
        assert_eq!(status, 200);
        assert_eq!(body["parameters"]["maxDistanceKm"], 1000.0);
        assert_eq!(body["parameters"]["minPoints"], 3);
    }

    #[actix_web::test]
    async fn clusters_rejects_non_positive_max_distance() {
        let uri = "/api/analytics/compliance-clusters?maxDistance=0";
        let (status, body) = call(fixture(), uri).await;
        assert_eq!(status, 400);
        assert_eq!(body["success"], false);
    }

    #[actix_web::test]
    async fn clusters_rejects_zero_min_points() {
        let uri = "/api/analytics/compliance-clusters?minPoints=0";
        let (status, body) = call(fixture(), uri).await;
        assert_eq!(status, 400);
        assert_eq!(body["success"], false);
    }

    #[actix_web::test]
    async fn clusters_short_circuits_without_geolocated_reports() {
        let ungeotagged = vec![report("agent-1", ComplianceStatus::Compliant, None)];
        let (status, body) = call(ungeotagged, "/api/analytics/compliance-clusters").await;
        assert_eq!(status, 200);
        assert_eq!(body["success"], true);
        assert_eq!(body["totalReports"], 0);
    }

    #[actix_web::test]
    async fn clusters_narrow_to_one_agent() {
        let uri = "/api/analytics/compliance-clusters?agentId=agent-2&minPoints=1";
        let (status, body) = call(fixture(), uri).await;
        assert_eq!(status, 200);
        assert_eq!(body["data"]["summary"]["totalPoints"], 1);
        assert_eq!(body["parameters"]["agentId"], "agent-2");
    }

    #[actix_web::test]
    async fn reports_lists_all() {
        let (status, body) = call(fixture(), "/api/reports").await;
        assert_eq!(status, 200);
        assert_eq!(body.as_array().unwrap().len(), 5);
    }

    #[actix_web::test]
    async fn reports_filters_by_status() {
        let (status, body) = call(fixture(), "/api/reports?status=FRAUDULENT").await;
        assert_eq!(status, 200);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["agentId"], "agent-2");
    }

    #[actix_web::test]
    async fn reports_rejects_unknown_status() {
        let (status, body) = call(fixture(), "/api/reports?status=PENDING").await;
        assert_eq!(status, 400);
        assert!(body["error"].as_str().unwrap().contains("PENDING"));
    }
}
