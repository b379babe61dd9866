//! Scholarship endpoints
//!
//! The listed resource of the marketplace: the parametrized collection GET
//! the listing protocol drives, the detail read, and the admin mutations.

use crate::client::{ApiClient, ApiError};
use crate::models::{CreateScholarshipInput, Scholarship, UpdateScholarshipInput};
use crate::services::listing::{ListEnvelope, ListQuery, ListResult};

impl ApiClient {
    /// GET /scholarships with the query's search/filter/sort/page params.
    pub async fn scholarships(&self, query: &ListQuery) -> Result<ListResult<Scholarship>, ApiError> {
        let envelope: ListEnvelope<Scholarship> =
            self.get_json_query("/scholarships", &query.params()).await?;
        Ok(envelope.into())
    }

    /// GET /scholarships/{id}
    pub async fn scholarship(&self, id: &str) -> Result<Scholarship, ApiError> {
        self.get_json(&format!("/scholarships/{}", urlencoding::encode(id)))
            .await
    }

    /// POST /scholarships (admin)
    pub async fn create_scholarship(
        &self,
        input: &CreateScholarshipInput,
    ) -> Result<Scholarship, ApiError> {
        self.post_json("/scholarships", input).await
    }

    /// PATCH /scholarships/{id} (admin)
    pub async fn update_scholarship(
        &self,
        id: &str,
        input: &UpdateScholarshipInput,
    ) -> Result<Scholarship, ApiError> {
        self.patch_json(&format!("/scholarships/{}", urlencoding::encode(id)), input)
            .await
    }

    /// DELETE /scholarships/{id} (admin; caller confirms first)
    pub async fn delete_scholarship(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/scholarships/{}", urlencoding::encode(id)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::store::MemoryTokenStore;
    use std::sync::Arc;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn scholarship_json(id: &str, fees: f64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "scholarshipName": "Global Merit Award",
            "universityName": "University of Toronto",
            "universityCountry": "Canada",
            "universityCity": "Toronto",
            "subjectCategory": "Engineering",
            "scholarshipCategory": "Full fund",
            "degree": "Masters",
            "applicationFees": fees,
            "serviceCharge": 50.0,
            "applicationDeadline": "2026-12-01T00:00:00Z",
            "postDate": "2026-06-15T00:00:00Z",
            "postedUserEmail": "admin@example.com"
        })
    }

    async fn client_for(server: &MockServer) -> ApiClient {
        let config = ApiConfig {
            base_url: Some(server.uri()),
        };
        ApiClient::new(&config, Arc::new(MemoryTokenStore::new()))
    }

    #[tokio::test]
    async fn test_list_sends_query_params_and_parses_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/scholarships"))
            .and(query_param("page", "1"))
            .and(query_param("limit", "9"))
            .and(query_param("category", "Arts"))
            .and(query_param("sortBy", "postDate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [scholarship_json("s1", 100.0)],
                "totalPages": 4
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let mut query = ListQuery::new();
        query.set_category(Some("Arts".to_string()));

        let result = client.scholarships(&query).await.unwrap();
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].id, "s1");
        assert_eq!(result.total_pages, 4);
    }

    #[tokio::test]
    async fn test_list_without_pagination_metadata_is_one_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/scholarships"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [scholarship_json("s1", 100.0), scholarship_json("s2", 80.0)]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.scholarships(&ListQuery::new()).await.unwrap();
        assert_eq!(result.total_pages, 1);
        assert_eq!(result.items.len(), 2);
    }

    #[tokio::test]
    async fn test_detail_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/scholarships/s9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(scholarship_json("s9", 75.0)))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let scholarship = client.scholarship("s9").await.unwrap();
        assert_eq!(scholarship.application_fees, 75.0);
    }

    #[tokio::test]
    async fn test_delete_passes_through_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/scholarships/s9"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(serde_json::json!({"message": "admin only"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.delete_scholarship("s9").await.unwrap_err();
        assert_eq!(err.to_string(), "admin only");
    }
}
