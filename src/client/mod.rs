//! Backend API client
//!
//! Outbound HTTP to the marketplace backend. One thin wrapper owns the
//! concerns every call shares: the bearer token is read from the store at
//! the moment a request is issued, and non-2xx responses are normalized to
//! a single error shape. Typed endpoint wrappers live in the per-resource
//! submodules.

pub mod analytics;
pub mod applications;
pub mod payments;
pub mod reviews;
pub mod scholarships;
pub mod users;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::ApiConfig;
use crate::store::TokenStore;

/// Error shape every backend call normalizes to.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No API base URL was configured; the call never left the process
    #[error("API base URL is not configured")]
    NotConfigured,

    /// The backend answered non-2xx; `message` is the response body's
    /// `message` field, or `API Error: <status>` when absent
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request never produced a response
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// HTTP status of a backend rejection, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Client for the marketplace backend.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Option<String>,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a client over the configured base URL.
    ///
    /// A missing base URL is not an error here: each call then fails with
    /// [`ApiError::NotConfigured`] instead of crashing startup.
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config
                .base_url
                .as_ref()
                .map(|u| u.trim_end_matches('/').to_string()),
            tokens,
        }
    }

    fn url(&self, path: &str) -> Result<String, ApiError> {
        let base = self.base_url.as_deref().ok_or(ApiError::NotConfigured)?;
        Ok(format!("{}/{}", base, path.trim_start_matches('/')))
    }

    /// Build a request, attaching the bearer token when one is stored.
    ///
    /// The token is read from the store at issue time, never cached on the
    /// client, so a logout in one flow is visible to every later request.
    async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.url(path)?;
        tracing::debug!(%url, "API request");
        let mut req = self.http.request(method, &url);
        if let Some(token) = self.tokens.get().await {
            req = req.bearer_auth(token);
        }
        Ok(req)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.request(Method::GET, path).await?.send().await?;
        handle_response(resp).await
    }

    pub(crate) async fn get_json_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ApiError> {
        let resp = self
            .request(Method::GET, path)
            .await?
            .query(query)
            .send()
            .await?;
        handle_response(resp).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self
            .request(Method::POST, path)
            .await?
            .json(body)
            .send()
            .await?;
        handle_response(resp).await
    }

    pub(crate) async fn patch_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self
            .request(Method::PATCH, path)
            .await?
            .json(body)
            .send()
            .await?;
        handle_response(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let resp = self.request(Method::DELETE, path).await?.send().await?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(status.as_u16(), &body),
            })
        }
    }
}

async fn handle_response<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp.json::<T>().await?)
    } else {
        let body = resp.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message(status.as_u16(), &body),
        })
    }
}

/// Body shape the backend uses for failures
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| format!("API Error: {}", status))
}
