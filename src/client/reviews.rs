//! Review endpoints

use crate::client::{ApiClient, ApiError};
use crate::models::{CreateReviewInput, Review, UpdateReviewInput};

impl ApiClient {
    /// POST /reviews
    pub async fn create_review(&self, input: &CreateReviewInput) -> Result<Review, ApiError> {
        self.post_json("/reviews", input).await
    }

    /// GET /reviews - every review (moderator).
    pub async fn reviews(&self) -> Result<Vec<Review>, ApiError> {
        self.get_json("/reviews").await
    }

    /// GET /reviews?scholarshipId= - reviews shown on a detail screen.
    pub async fn reviews_for_scholarship(
        &self,
        scholarship_id: &str,
    ) -> Result<Vec<Review>, ApiError> {
        let params = vec![("scholarshipId".to_string(), scholarship_id.to_string())];
        self.get_json_query("/reviews", &params).await
    }

    /// GET /reviews?email= - the caller's own reviews.
    pub async fn reviews_by_reviewer(&self, email: &str) -> Result<Vec<Review>, ApiError> {
        let params = vec![("email".to_string(), email.to_string())];
        self.get_json_query("/reviews", &params).await
    }

    /// PATCH /reviews/{id}
    pub async fn update_review(
        &self,
        id: &str,
        input: &UpdateReviewInput,
    ) -> Result<Review, ApiError> {
        self.patch_json(&format!("/reviews/{}", urlencoding::encode(id)), input)
            .await
    }

    /// DELETE /reviews/{id} (caller confirms first)
    pub async fn delete_review(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/reviews/{}", urlencoding::encode(id)))
            .await
    }
}
