#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Compliance report domain types.
//!
//! This crate defines the canonical compliance finding taxonomy and the
//! report type shared across the fieldscan system. Reports are created by
//! the field reporting workflow and consumed read-only by the analytics
//! engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use uuid::Uuid;

/// Outcome of a field inspection.
///
/// The status set is closed: unknown values are rejected when a report is
/// deserialized rather than silently dropped downstream.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceStatus {
    /// Product label matched the registry entry.
    Compliant,
    /// Label deviated from the registry entry (mislabeling, missing
    /// classification, expired registration).
    NonCompliant,
    /// Label appears counterfeit or the product is not registered at all.
    Fraudulent,
}

impl ComplianceStatus {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Compliant, Self::NonCompliant, Self::Fraudulent]
    }
}

/// A single field inspection event submitted by an agent.
///
/// Latitude and longitude are optional: agents can submit reports from
/// devices without a GPS fix. Reports without a full coordinate pair are
/// kept for record purposes but excluded from spatial analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    /// Unique report ID.
    pub id: Uuid,
    /// ID of the agent who submitted the report.
    pub agent_id: String,
    /// Compliance finding.
    pub status: ComplianceStatus,
    /// Reason for a non-compliant or fraudulent finding.
    pub reason: Option<String>,
    /// Latitude in degrees, if a GPS fix was available.
    pub latitude: Option<f64>,
    /// Longitude in degrees, if a GPS fix was available.
    pub longitude: Option<f64>,
    /// Raw scanned label payload (OCR text, extracted fields). Opaque to
    /// the analytics engine.
    pub scanned_data: Option<serde_json::Value>,
    /// When the report was submitted.
    pub created_at: DateTime<Utc>,
}

impl ComplianceReport {
    /// Returns the report's `(latitude, longitude)` pair if both
    /// components are present and finite.
    ///
    /// Non-finite values can't arrive via JSON but can be constructed
    /// programmatically; they are treated the same as a missing fix.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some((lat, lng)),
            _ => None,
        }
    }
}
