#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the fieldscan server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the domain types to allow independent evolution of the API
//! contract.

use chrono::{DateTime, Utc};
use fieldscan_analytics_models::AnalysisResult;
use fieldscan_report_models::{ComplianceReport, ComplianceStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
}

/// Query parameters for the compliance clusters endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceClusterParams {
    /// Neighborhood radius in kilometers (default 1000).
    pub max_distance: Option<f64>,
    /// Minimum cluster seed size (default 3).
    pub min_points: Option<usize>,
    /// Restrict the analysis to one agent's reports.
    pub agent_id: Option<String>,
}

/// Parameters echoed back with an analysis response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedClusterParams {
    /// Neighborhood radius in kilometers.
    pub max_distance_km: f64,
    /// Minimum cluster seed size.
    pub min_points: usize,
    /// Agent filter applied, if any.
    pub agent_id: Option<String>,
}

/// Successful analysis response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterAnalysisResponse {
    /// Always `true` for this envelope.
    pub success: bool,
    /// The analysis result.
    pub data: AnalysisResult,
    /// Parameters the analysis ran with.
    pub parameters: AppliedClusterParams,
}

/// Fixed response when the store holds no geolocated reports: the engine
/// treats empty input as an error, so the handler answers before invoking
/// it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoDataResponse {
    /// Always `true`: an empty report set is not a service fault.
    pub success: bool,
    /// Always zero.
    pub total_reports: usize,
    /// Human-readable explanation.
    pub message: String,
}

impl NoDataResponse {
    /// The fixed no-data payload.
    #[must_use]
    pub fn new() -> Self {
        Self {
            success: true,
            total_reports: 0,
            message: "No geolocated compliance reports available for analysis".to_string(),
        }
    }
}

impl Default for NoDataResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Query parameters for the report listing endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQueryParams {
    /// Filter by submitting agent.
    pub agent_id: Option<String>,
    /// Filter by finding (`COMPLIANT`, `NON_COMPLIANT`, `FRAUDULENT`).
    pub status: Option<String>,
    /// Maximum number of results.
    pub limit: Option<usize>,
    /// Offset for pagination.
    pub offset: Option<usize>,
}

/// A compliance report as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiReport {
    /// Unique report ID.
    pub id: Uuid,
    /// Submitting agent.
    pub agent_id: String,
    /// Compliance finding.
    pub status: ComplianceStatus,
    /// Reason for a non-compliant or fraudulent finding.
    pub reason: Option<String>,
    /// Latitude in degrees, if geotagged.
    pub latitude: Option<f64>,
    /// Longitude in degrees, if geotagged.
    pub longitude: Option<f64>,
    /// Raw scanned label payload.
    pub scanned_data: Option<serde_json::Value>,
    /// When the report was submitted (ISO 8601).
    pub created_at: DateTime<Utc>,
}

impl From<ComplianceReport> for ApiReport {
    fn from(report: ComplianceReport) -> Self {
        Self {
            id: report.id,
            agent_id: report.agent_id,
            status: report.status,
            reason: report.reason,
            latitude: report.latitude,
            longitude: report.longitude,
            scanned_data: report.scanned_data,
            created_at: report.created_at,
        }
    }
}
