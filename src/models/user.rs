//! User profile model
//!
//! Defines the server-side user record and the role variants that gate
//! capabilities. The profile is keyed by email and is fetched fresh per
//! navigation - it is never cached beyond the current view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-side user record carrying the role and profile fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Backend-assigned record id
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address (the lookup key)
    pub email: String,
    /// Profile photo URL
    #[serde(default)]
    pub photo_url: Option<String>,
    /// Contact phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Active role
    #[serde(default)]
    pub role: UserRole,
    /// Subject categories assigned to a moderator
    #[serde(default)]
    pub categories: Vec<String>,
    /// Creation timestamp, when the backend reports one
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// User role for authorization.
///
/// Roles are disjoint variants, not levels - there is no hierarchy or
/// inheritance between them:
/// - Student: manage own applications, reviews and profile
/// - Moderator: manage all applications/reviews within assigned categories
/// - Admin: manage scholarships and users, view aggregate analytics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Student - the least-privileged default
    #[default]
    Student,
    /// Moderator - reviews applications within assigned categories
    Moderator,
    /// Admin - manages scholarships and users
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Student => write!(f, "student"),
            UserRole::Moderator => write!(f, "moderator"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for UserRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(UserRole::Student),
            "moderator" => Ok(UserRole::Moderator),
            "admin" => Ok(UserRole::Admin),
            _ => Err(anyhow::anyhow!("Invalid user role: {}", s)),
        }
    }
}

/// Input for creating a backend user record.
///
/// Registration always submits the fixed default role; role reassignment is
/// a separate admin operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Profile photo URL (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Role assigned at creation
    pub role: UserRole,
}

impl CreateUserInput {
    /// Build the record a fresh registration submits: always Student.
    pub fn registration(
        name: impl Into<String>,
        email: impl Into<String>,
        photo_url: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            photo_url,
            role: UserRole::Student,
        }
    }
}

/// Input for updating the caller's own profile
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileInput {
    /// New display name (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New photo URL (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// New phone number (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// New moderator categories (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}
