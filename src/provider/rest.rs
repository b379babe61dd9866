//! REST identity provider
//!
//! Speaks the identity-toolkit account API (`accounts:signInWithPassword`,
//! `accounts:signUp`, `accounts:update`, `accounts:delete`) with the public
//! API key appended to each call. The provider keeps no durable session of
//! its own: `restore()` publishes the initial signed-out state, and
//! sign-in/sign-out publish transitions on the watch channel.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::config::ProviderConfig;
use crate::models::Identity;
use crate::provider::{IdentityProvider, ProviderError, ProviderState};

/// Identity provider backed by an account REST endpoint.
pub struct RestIdentityProvider {
    http: reqwest::Client,
    base_url: Option<String>,
    api_key: Option<String>,
    state: watch::Sender<ProviderState>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRequest<'a> {
    local_id: &'a str,
    display_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    photo_url: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteRequest<'a> {
    local_id: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    email: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: Option<ProviderErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    message: Option<String>,
}

impl From<AccountResponse> for Identity {
    fn from(account: AccountResponse) -> Self {
        Identity {
            uid: account.local_id,
            email: account.email,
            display_name: account.display_name,
            photo_url: account.photo_url,
        }
    }
}

impl RestIdentityProvider {
    /// Build a provider over the configured endpoint.
    ///
    /// A missing endpoint or key is legal: every call then fails with
    /// [`ProviderError::NotConfigured`] instead of crashing startup.
    pub fn new(config: &ProviderConfig) -> Self {
        let (state, _) = watch::channel(ProviderState::Unknown);
        Self {
            http: reqwest::Client::new(),
            base_url: config
                .base_url
                .as_ref()
                .map(|u| u.trim_end_matches('/').to_string()),
            api_key: config.api_key.clone(),
            state,
        }
    }

    /// Publish the initial state delivery.
    ///
    /// This provider holds no durable session, so the first delivery is
    /// always `SignedOut`. Call once at startup; it is what moves session
    /// consumers out of their loading state.
    pub fn restore(&self) {
        self.state.send_replace(ProviderState::SignedOut);
    }

    fn endpoint(&self, action: &str) -> Result<String, ProviderError> {
        let base = self.base_url.as_deref().ok_or(ProviderError::NotConfigured)?;
        let key = self.api_key.as_deref().ok_or(ProviderError::NotConfigured)?;
        Ok(format!(
            "{}/accounts:{}?key={}",
            base,
            action,
            urlencoding::encode(key)
        ))
    }

    async fn call<B: Serialize, T: for<'de> Deserialize<'de>>(
        &self,
        action: &str,
        body: &B,
    ) -> Result<T, ProviderError> {
        let url = self.endpoint(action)?;
        let resp = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            resp.json::<T>()
                .await
                .map_err(|e| ProviderError::Transport(e.to_string()))
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(ProviderError::Rejected(rejection_message(
                status.as_u16(),
                &body,
            )))
        }
    }
}

fn rejection_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ProviderErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .and_then(|e| e.message)
        .unwrap_or_else(|| format!("Provider error: {}", status))
}

#[async_trait]
impl IdentityProvider for RestIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, ProviderError> {
        let account: AccountResponse = self
            .call(
                "signInWithPassword",
                &SignInRequest {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;
        let identity: Identity = account.into();
        self.state
            .send_replace(ProviderState::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
        photo_url: Option<&str>,
    ) -> Result<Identity, ProviderError> {
        let account: AccountResponse = self
            .call(
                "signUp",
                &SignInRequest {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;

        let updated: AccountResponse = self
            .call(
                "update",
                &UpdateRequest {
                    local_id: &account.local_id,
                    display_name: name,
                    photo_url,
                },
            )
            .await?;

        let identity: Identity = updated.into();
        self.state
            .send_replace(ProviderState::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        // No remote session to revoke; the delivery is the sign-out.
        self.state.send_replace(ProviderState::SignedOut);
        Ok(())
    }

    async fn delete_account(&self, uid: &str) -> Result<(), ProviderError> {
        let _: serde_json::Value = self.call("delete", &DeleteRequest { local_id: uid }).await?;
        self.state.send_replace(ProviderState::SignedOut);
        Ok(())
    }

    fn watch(&self) -> watch::Receiver<ProviderState> {
        self.state.subscribe()
    }
}
