//! Application endpoints
//!
//! Submission happens through the checkout flow (the fee is paid first);
//! students manage their own applications, moderators manage all of them
//! within their categories.

use serde::Serialize;

use crate::client::{ApiClient, ApiError};
use crate::models::{
    Application, ApplicationStatus, CreateApplicationInput, UpdateApplicationInput,
};

#[derive(Debug, Serialize)]
struct StatusBody {
    status: ApplicationStatus,
}

#[derive(Debug, Serialize)]
struct FeedbackBody<'a> {
    feedback: &'a str,
}

impl ApiClient {
    /// POST /applications - record a paid application.
    pub async fn submit_application(
        &self,
        input: &CreateApplicationInput,
    ) -> Result<Application, ApiError> {
        self.post_json("/applications", input).await
    }

    /// GET /applications?email= - the caller's own applications.
    pub async fn applications_by_applicant(
        &self,
        email: &str,
    ) -> Result<Vec<Application>, ApiError> {
        let params = vec![("email".to_string(), email.to_string())];
        self.get_json_query("/applications", &params).await
    }

    /// GET /applications - all applications, optionally narrowed to a
    /// subject category (moderator).
    pub async fn applications(&self, category: Option<&str>) -> Result<Vec<Application>, ApiError> {
        let mut params = Vec::new();
        if let Some(category) = category {
            params.push(("category".to_string(), category.to_string()));
        }
        self.get_json_query("/applications", &params).await
    }

    /// PATCH /applications/{id} - edit a pending application.
    pub async fn update_application(
        &self,
        id: &str,
        input: &UpdateApplicationInput,
    ) -> Result<Application, ApiError> {
        self.patch_json(&format!("/applications/{}", urlencoding::encode(id)), input)
            .await
    }

    /// DELETE /applications/{id} - cancel (caller confirms first).
    pub async fn cancel_application(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/applications/{}", urlencoding::encode(id)))
            .await
    }

    /// PATCH /applications/{id}/status (moderator)
    pub async fn set_application_status(
        &self,
        id: &str,
        status: ApplicationStatus,
    ) -> Result<Application, ApiError> {
        self.patch_json(
            &format!("/applications/{}/status", urlencoding::encode(id)),
            &StatusBody { status },
        )
        .await
    }

    /// PATCH /applications/{id}/feedback (moderator)
    pub async fn set_application_feedback(
        &self,
        id: &str,
        feedback: &str,
    ) -> Result<Application, ApiError> {
        self.patch_json(
            &format!("/applications/{}/feedback", urlencoding::encode(id)),
            &FeedbackBody { feedback },
        )
        .await
    }
}
