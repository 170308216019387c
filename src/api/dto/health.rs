//! DTOs for the health endpoint.

use serde::{Deserialize, Serialize};

use crate::application::services::DirectoryStats;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`.
    pub status: String,
    pub version: String,
    pub database: DatabaseCheck,
}

/// Result of probing storage through the link service.
#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseCheck {
    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub visits: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DatabaseCheck {
    pub fn from_stats(stats: DirectoryStats) -> Self {
        Self {
            ok: true,
            links: Some(stats.links),
            visits: Some(stats.visits),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            links: None,
            visits: None,
            error: Some(error.into()),
        }
    }
}
