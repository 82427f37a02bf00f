//! DTOs for the health check endpoint.

use serde::{Deserialize, Serialize};

/// Overall health response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"healthy"` or `"degraded"`.
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

/// Per-component check results.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
    pub audit_queue: CheckStatus,
}

/// Result of a single component check.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckStatus {
    /// `"ok"` or `"error"`.
    pub status: String,
    pub message: Option<String>,
}
