//! Scholarship model
//!
//! The primary listed resource of the marketplace. Wire names follow the
//! backend's camelCase JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A posted scholarship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scholarship {
    /// Backend-assigned record id
    pub id: String,
    /// Scholarship name
    pub scholarship_name: String,
    /// Hosting university
    pub university_name: String,
    /// University country
    pub university_country: String,
    /// University city
    pub university_city: String,
    /// World-rank position, when known
    #[serde(default)]
    pub university_world_rank: Option<u32>,
    /// Subject category (e.g. "Agriculture", "Engineering", "Arts")
    pub subject_category: String,
    /// Funding tier
    pub scholarship_category: ScholarshipCategory,
    /// Degree level
    pub degree: Degree,
    /// Tuition fees in USD, when disclosed
    #[serde(default)]
    pub tuition_fees: Option<f64>,
    /// Application fee in USD
    pub application_fees: f64,
    /// Service charge in USD added at checkout
    pub service_charge: f64,
    /// Application deadline
    pub application_deadline: DateTime<Utc>,
    /// When the scholarship was posted
    pub post_date: DateTime<Utc>,
    /// Email of the admin who posted it
    pub posted_user_email: String,
}

/// Funding tier of a scholarship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScholarshipCategory {
    /// Tuition and living costs covered
    #[serde(rename = "Full fund")]
    FullFund,
    /// Tuition partially covered
    #[serde(rename = "Partial")]
    Partial,
    /// Applicant pays tuition
    #[serde(rename = "Self-fund")]
    SelfFund,
}

impl fmt::Display for ScholarshipCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScholarshipCategory::FullFund => write!(f, "Full fund"),
            ScholarshipCategory::Partial => write!(f, "Partial"),
            ScholarshipCategory::SelfFund => write!(f, "Self-fund"),
        }
    }
}

impl FromStr for ScholarshipCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Full fund" => Ok(ScholarshipCategory::FullFund),
            "Partial" => Ok(ScholarshipCategory::Partial),
            "Self-fund" => Ok(ScholarshipCategory::SelfFund),
            _ => Err(anyhow::anyhow!("Invalid scholarship category: {}", s)),
        }
    }
}

/// Degree level a scholarship admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Degree {
    Diploma,
    Bachelor,
    Masters,
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degree::Diploma => write!(f, "Diploma"),
            Degree::Bachelor => write!(f, "Bachelor"),
            Degree::Masters => write!(f, "Masters"),
        }
    }
}

impl FromStr for Degree {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Diploma" => Ok(Degree::Diploma),
            "Bachelor" => Ok(Degree::Bachelor),
            "Masters" => Ok(Degree::Masters),
            _ => Err(anyhow::anyhow!("Invalid degree: {}", s)),
        }
    }
}

/// Input for posting a new scholarship (admin)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScholarshipInput {
    pub scholarship_name: String,
    pub university_name: String,
    pub university_country: String,
    pub university_city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university_world_rank: Option<u32>,
    pub subject_category: String,
    pub scholarship_category: ScholarshipCategory,
    pub degree: Degree,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuition_fees: Option<f64>,
    pub application_fees: f64,
    pub service_charge: f64,
    pub application_deadline: DateTime<Utc>,
    pub post_date: DateTime<Utc>,
    pub posted_user_email: String,
}

/// Input for updating a scholarship (admin)
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScholarshipInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scholarship_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university_world_rank: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scholarship_category: Option<ScholarshipCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<Degree>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuition_fees: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_fees: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_charge: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_deadline: Option<DateTime<Utc>>,
}
