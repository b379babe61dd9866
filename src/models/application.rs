//! Application model
//!
//! A student's application to a scholarship, created after the application
//! fee has been paid. The `transaction_id` ties the record to its payment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::Degree;

/// A submitted scholarship application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Backend-assigned record id
    pub id: String,
    /// Scholarship this application targets
    pub scholarship_id: String,
    /// Applicant email (ties the record to the session identity)
    pub applicant_email: String,
    /// University name, denormalized for moderator tables
    pub university_name: String,
    /// Subject category, denormalized for moderator assignment
    pub subject_category: String,
    /// Degree applied for
    pub degree: Degree,
    /// Contact phone
    pub applicant_phone: String,
    /// Postal address
    pub applicant_address: String,
    /// Self-reported gender
    pub applicant_gender: String,
    /// Secondary-school result on a 5.0 scale
    pub ssc_result: f32,
    /// Higher-secondary result on a 5.0 scale
    pub hsc_result: f32,
    /// Study gap in years, if any
    #[serde(default)]
    pub study_gap: Option<u8>,
    /// Review status
    #[serde(default)]
    pub status: ApplicationStatus,
    /// Moderator feedback, once given
    #[serde(default)]
    pub feedback: Option<String>,
    /// Transaction id of the paid application fee
    pub transaction_id: String,
    /// Submission timestamp
    pub applied_at: DateTime<Utc>,
}

/// Review status of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    /// Awaiting moderator attention
    #[default]
    Pending,
    /// Under review
    Processing,
    /// Accepted and closed
    Completed,
    /// Declined
    Rejected,
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplicationStatus::Pending => write!(f, "pending"),
            ApplicationStatus::Processing => write!(f, "processing"),
            ApplicationStatus::Completed => write!(f, "completed"),
            ApplicationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ApplicationStatus::Pending),
            "processing" => Ok(ApplicationStatus::Processing),
            "completed" => Ok(ApplicationStatus::Completed),
            "rejected" => Ok(ApplicationStatus::Rejected),
            _ => Err(anyhow::anyhow!("Invalid application status: {}", s)),
        }
    }
}

/// Input for submitting an application.
///
/// `transaction_id` is filled by the checkout flow after payment succeeds;
/// the form itself never carries one.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationInput {
    pub scholarship_id: String,
    pub applicant_email: String,
    pub university_name: String,
    pub subject_category: String,
    pub degree: Degree,
    pub applicant_phone: String,
    pub applicant_address: String,
    pub applicant_gender: String,
    pub ssc_result: f32,
    pub hsc_result: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_gap: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

/// Input for editing a pending application
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant_gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<Degree>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssc_result: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsc_result: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_gap: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_default_is_pending() {
        assert_eq!(ApplicationStatus::default(), ApplicationStatus::Pending);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Processing,
            ApplicationStatus::Completed,
            ApplicationStatus::Rejected,
        ] {
            assert_eq!(
                status.to_string().parse::<ApplicationStatus>().unwrap(),
                status
            );
        }
        assert!("approved".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn test_application_missing_status_defaults_pending() {
        let json = r#"{
            "id": "a1",
            "scholarshipId": "s1",
            "applicantEmail": "amina@example.com",
            "universityName": "University of Toronto",
            "subjectCategory": "Engineering",
            "degree": "Masters",
            "applicantPhone": "01700000000",
            "applicantAddress": "12 Hill Road, Dhaka",
            "applicantGender": "female",
            "sscResult": 4.8,
            "hscResult": 4.9,
            "transactionId": "tx-1",
            "appliedAt": "2026-07-01T10:00:00Z"
        }"#;
        let app: Application = serde_json::from_str(json).unwrap();
        assert_eq!(app.status, ApplicationStatus::Pending);
        assert!(app.feedback.is_none());
        assert!(app.study_gap.is_none());
    }
}
