//! Analytics endpoints
//!
//! Aggregate reads behind the Admin capability set.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::client::{ApiClient, ApiError};
use crate::models::ApplicationStatus;

/// Aggregate counts the admin dashboard presents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_scholarships: u64,
    #[serde(default)]
    pub total_applications: u64,
    #[serde(default)]
    pub total_reviews: u64,
    #[serde(default)]
    pub fees_collected: f64,
    #[serde(default)]
    pub applications_by_status: HashMap<ApplicationStatus, u64>,
}

impl ApiClient {
    /// GET /analytics/summary (admin)
    pub async fn analytics_summary(&self) -> Result<AnalyticsSummary, ApiError> {
        self.get_json("/analytics/summary").await
    }
}
