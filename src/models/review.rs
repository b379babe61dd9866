//! Review model
//!
//! A student's rating and comment on a scholarship they applied to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A posted review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Backend-assigned record id
    pub id: String,
    /// Scholarship the review targets
    pub scholarship_id: String,
    /// Scholarship name, denormalized for review cards
    pub scholarship_name: String,
    /// University name, denormalized for review cards
    pub university_name: String,
    /// Reviewer email (ties the record to the session identity)
    pub reviewer_email: String,
    /// Reviewer display name
    pub reviewer_name: String,
    /// Reviewer photo URL
    #[serde(default)]
    pub reviewer_image: Option<String>,
    /// Rating, 1.0 through 5.0
    pub rating: f32,
    /// Review text
    pub comment: String,
    /// When the review was posted
    pub review_date: DateTime<Utc>,
}

/// Input for posting a review
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewInput {
    pub scholarship_id: String,
    pub scholarship_name: String,
    pub university_name: String,
    pub reviewer_email: String,
    pub reviewer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer_image: Option<String>,
    pub rating: f32,
    pub comment: String,
}

/// Input for editing an own review
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}
