#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Compliance report store.
//!
//! The analytics server reads reports through the [`ReportStore`] trait;
//! the backing implementation here holds the full report set in memory,
//! seeded from a JSON file at startup. The reporting workflow that writes
//! reports lives upstream and is not part of this service.

use std::path::Path;

use async_trait::async_trait;
use fieldscan_report_models::{ComplianceReport, ComplianceStatus};
use thiserror::Error;

/// Errors that can occur while loading or querying reports.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading the seed file failed.
    #[error("Failed to read report data: {0}")]
    Io(#[from] std::io::Error),

    /// The seed file was not valid report JSON.
    #[error("Failed to parse report data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Filters for a report listing query.
#[derive(Debug, Clone, Default)]
pub struct ReportQuery {
    /// Only reports submitted by this agent.
    pub agent_id: Option<String>,
    /// Only reports with this finding.
    pub status: Option<ComplianceStatus>,
    /// Only reports carrying a usable coordinate pair.
    pub geolocated_only: bool,
    /// Maximum number of results. `None` means unbounded.
    pub limit: Option<usize>,
    /// Number of matching reports to skip.
    pub offset: usize,
}

/// Read access to the compliance report set.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Lists reports matching the query, in submission order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing data cannot be read.
    async fn list_reports(&self, query: &ReportQuery) -> Result<Vec<ComplianceReport>, StoreError>;
}

/// Report store backed by an in-memory vector.
///
/// The report set is immutable once constructed, so lookups need no
/// locking and the store can be shared freely across request handlers.
pub struct InMemoryReportStore {
    reports: Vec<ComplianceReport>,
}

impl InMemoryReportStore {
    /// Creates a store over the given reports.
    #[must_use]
    pub const fn new(reports: Vec<ComplianceReport>) -> Self {
        Self { reports }
    }

    /// Loads a store from a JSON file containing an array of reports.
    ///
    /// A missing file yields an empty store with a warning rather than an
    /// error, so a fresh deployment can start before any reports exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file exists but cannot be read or
    /// parsed.
    pub fn from_json_file(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            log::warn!("Report data file {} not found, starting empty", path.display());
            return Ok(Self::new(Vec::new()));
        }

        let raw = std::fs::read_to_string(path)?;
        let reports: Vec<ComplianceReport> = serde_json::from_str(&raw)?;
        log::info!("Loaded {} reports from {}", reports.len(), path.display());
        Ok(Self::new(reports))
    }

    /// Number of reports held by the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// Whether the store holds no reports.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn list_reports(&self, query: &ReportQuery) -> Result<Vec<ComplianceReport>, StoreError> {
        let matches = self
            .reports
            .iter()
            .filter(|report| {
                query
                    .agent_id
                    .as_ref()
                    .is_none_or(|agent| report.agent_id == *agent)
            })
            .filter(|report| query.status.is_none_or(|status| report.status == status))
            .filter(|report| !query.geolocated_only || report.coordinates().is_some())
            .skip(query.offset)
            .take(query.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok(matches)
    }
}
