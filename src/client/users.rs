//! User endpoints
//!
//! The backend user records behind role gating: creation at registration,
//! the per-navigation profile fetch, the email-for-token exchange, and the
//! admin user management surface.

use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, ApiError};
use crate::models::{CreateUserInput, UpdateProfileInput, UserProfile, UserRole};

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Debug, Serialize)]
struct RoleBody {
    role: UserRole,
}

impl ApiClient {
    /// POST /users - create the backend record for a fresh registration.
    pub async fn create_user(&self, input: &CreateUserInput) -> Result<UserProfile, ApiError> {
        self.post_json("/users", input).await
    }

    /// POST /jwt - exchange an email for an application token.
    pub async fn exchange_token(&self, email: &str) -> Result<String, ApiError> {
        let resp: TokenResponse = self.post_json("/jwt", &TokenRequest { email }).await?;
        Ok(resp.token)
    }

    /// GET /users/{email} - the profile fetch role gating relies on.
    pub async fn user_by_email(&self, email: &str) -> Result<UserProfile, ApiError> {
        self.get_json(&format!("/users/{}", urlencoding::encode(email)))
            .await
    }

    /// GET /users - all users, optionally narrowed to one role (admin).
    pub async fn users(&self, role: Option<UserRole>) -> Result<Vec<UserProfile>, ApiError> {
        let mut params = Vec::new();
        if let Some(role) = role {
            params.push(("role".to_string(), role.to_string()));
        }
        self.get_json_query("/users", &params).await
    }

    /// PATCH /users/{email} - edit own profile fields.
    pub async fn update_profile(
        &self,
        email: &str,
        input: &UpdateProfileInput,
    ) -> Result<UserProfile, ApiError> {
        self.patch_json(&format!("/users/{}", urlencoding::encode(email)), input)
            .await
    }

    /// PATCH /users/{id}/role - reassign a role (admin).
    pub async fn set_user_role(&self, id: &str, role: UserRole) -> Result<UserProfile, ApiError> {
        self.patch_json(
            &format!("/users/{}/role", urlencoding::encode(id)),
            &RoleBody { role },
        )
        .await
    }

    /// DELETE /users/{id} (admin; caller confirms first)
    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/users/{}", urlencoding::encode(id)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::store::MemoryTokenStore;
    use std::sync::Arc;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> ApiClient {
        let config = ApiConfig {
            base_url: Some(server.uri()),
        };
        ApiClient::new(&config, Arc::new(MemoryTokenStore::new()))
    }

    #[tokio::test]
    async fn test_exchange_token_posts_email() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/jwt"))
            .and(body_json(serde_json::json!({"email": "amina@example.com"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": "tok-1"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.exchange_token("amina@example.com").await.unwrap(), "tok-1");
    }

    #[tokio::test]
    async fn test_user_by_email_encodes_path_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/amina%40example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "u1",
                "name": "Amina",
                "email": "amina@example.com",
                "role": "moderator"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let profile = client.user_by_email("amina@example.com").await.unwrap();
        assert_eq!(profile.role, UserRole::Moderator);
    }

    #[tokio::test]
    async fn test_users_filters_by_role() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .and(query_param("role", "moderator"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let users = client.users(Some(UserRole::Moderator)).await.unwrap();
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn test_create_user_sends_student_role() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .and(body_json(serde_json::json!({
                "name": "Amina",
                "email": "amina@example.com",
                "role": "student"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "u1",
                "name": "Amina",
                "email": "amina@example.com",
                "role": "student"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let input = CreateUserInput::registration("Amina", "amina@example.com", None);
        let profile = client.create_user(&input).await.unwrap();
        assert_eq!(profile.role, UserRole::Student);
    }
}
