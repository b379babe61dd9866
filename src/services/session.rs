//! Session store
//!
//! Single source of truth for "who is acting". One store is created at
//! application start and injected into every consumer; screens observe it
//! through a watch subscription rather than a process-wide singleton.
//!
//! Login exchanges provider credentials for an identity, then the identity's
//! email for an application token. The two either both land or both do not:
//! a token-exchange failure signs the provider session back out, so the
//! session never holds an identity without a token. Logout clears local
//! state before the provider call, so a failing provider sign-out still
//! leaves the user locally signed out (the failure is still reported).

use std::sync::Arc;
use tokio::sync::watch;

use crate::client::ApiClient;
use crate::models::{CreateUserInput, Identity, Session};
use crate::provider::{IdentityProvider, ProviderState};
use crate::store::TokenStore;

/// Error types for session operations
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The identity provider rejected the operation; its message is
    /// surfaced verbatim
    #[error("{0}")]
    Provider(String),

    /// The backend declined to issue an application token
    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    /// A registration step after provider sign-up failed
    #[error("Registration failed: {0}")]
    Registration(String),

    /// Provider sign-out failed; local state is already cleared
    #[error("Sign-out failed: {0}")]
    SignOut(String),
}

/// Session store: current identity, application token, and auth status.
pub struct SessionStore {
    provider: Arc<dyn IdentityProvider>,
    api: Arc<ApiClient>,
    tokens: Arc<dyn TokenStore>,
    state: watch::Sender<Session>,
}

impl SessionStore {
    /// Create the store and start consuming the provider's state
    /// deliveries. The session stays `loading` until the first delivery.
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        api: Arc<ApiClient>,
        tokens: Arc<dyn TokenStore>,
    ) -> Arc<Self> {
        let (state, _) = watch::channel(Session::initial());
        let store = Arc::new(Self {
            provider,
            api,
            tokens,
            state,
        });
        store.spawn_listener();
        store
    }

    fn spawn_listener(self: &Arc<Self>) {
        let store = Arc::clone(self);
        let mut rx = store.provider.watch();
        tokio::spawn(async move {
            loop {
                let delivered = rx.borrow_and_update().clone();
                store.apply_provider_state(delivered).await;
                if rx.changed().await.is_err() {
                    break;
                }
            }
        });
    }

    /// Apply one passive provider delivery.
    ///
    /// `SignedOut` always clears the token, regardless of prior state.
    /// `Unknown` is the pre-first-delivery state and changes nothing.
    async fn apply_provider_state(&self, delivered: ProviderState) {
        match delivered {
            ProviderState::Unknown => {}
            ProviderState::SignedIn(identity) => {
                self.state.send_modify(|s| {
                    s.identity = Some(identity);
                    s.loading = false;
                });
            }
            ProviderState::SignedOut => {
                if let Err(e) = self.tokens.clear().await {
                    tracing::warn!(error = %e, "Failed to clear persisted token");
                }
                self.state.send_modify(|s| {
                    s.identity = None;
                    s.token = None;
                    s.loading = false;
                });
            }
        }
    }

    /// Observe session state; the receiver sees every transition.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Snapshot of the current session.
    pub fn current(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Sign in: provider credentials, then token exchange, then persist.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let identity = match self.provider.sign_in(email, password).await {
            Ok(identity) => identity,
            Err(e) => {
                let error = AuthError::Provider(e.to_string());
                self.record_failure(&error);
                return Err(error);
            }
        };

        let token = match self.api.exchange_token(email).await {
            Ok(token) => token,
            Err(e) => {
                return Err(self
                    .abort_login(AuthError::TokenExchange(e.to_string()))
                    .await);
            }
        };
        if let Err(e) = self.tokens.set(&token).await {
            return Err(self
                .abort_login(AuthError::TokenExchange(format!(
                    "Failed to persist token: {}",
                    e
                )))
                .await);
        }

        self.establish(identity, token);
        tracing::info!(email, "Login complete");
        Ok(self.current())
    }

    /// Register: provider sign-up, backend user record (always Student),
    /// then token exchange. A failure after the provider identity exists
    /// rolls the identity back so none is orphaned.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        photo_url: Option<&str>,
    ) -> Result<Session, AuthError> {
        let identity = match self.provider.sign_up(name, email, password, photo_url).await {
            Ok(identity) => identity,
            Err(e) => {
                let error = AuthError::Provider(e.to_string());
                self.record_failure(&error);
                return Err(error);
            }
        };

        let input = CreateUserInput::registration(name, email, photo_url.map(|p| p.to_string()));
        if let Err(e) = self.api.create_user(&input).await {
            return Err(self
                .abort_registration(&identity, AuthError::Registration(e.to_string()))
                .await);
        }

        let token = match self.api.exchange_token(email).await {
            Ok(token) => token,
            Err(e) => {
                return Err(self
                    .abort_registration(&identity, AuthError::Registration(e.to_string()))
                    .await);
            }
        };
        if let Err(e) = self.tokens.set(&token).await {
            return Err(self
                .abort_registration(
                    &identity,
                    AuthError::Registration(format!("Failed to persist token: {}", e)),
                )
                .await);
        }

        self.establish(identity, token);
        tracing::info!(email, "Registration complete");
        Ok(self.current())
    }

    /// Sign out. Local token and identity are cleared before the provider
    /// call; a provider failure is still reported as an error.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.clear().await;
        match self.provider.sign_out().await {
            Ok(()) => {
                tracing::info!("Logout complete");
                Ok(())
            }
            Err(e) => {
                let error = AuthError::SignOut(e.to_string());
                self.record_failure(&error);
                Err(error)
            }
        }
    }

    /// Drop local token and identity without touching the provider.
    pub async fn clear(&self) {
        if let Err(e) = self.tokens.clear().await {
            tracing::warn!(error = %e, "Failed to clear persisted token");
        }
        self.state.send_modify(|s| {
            s.identity = None;
            s.token = None;
            s.last_error = None;
        });
    }

    fn establish(&self, identity: Identity, token: String) {
        self.state.send_modify(|s| {
            s.identity = Some(identity);
            s.token = Some(token);
            s.loading = false;
            s.last_error = None;
        });
    }

    fn record_failure(&self, error: &AuthError) {
        self.state.send_modify(|s| {
            s.last_error = Some(error.to_string());
        });
    }

    /// Undo a half-done login: no identity-without-token may survive.
    async fn abort_login(&self, error: AuthError) -> AuthError {
        if let Err(e) = self.provider.sign_out().await {
            tracing::warn!(error = %e, "Provider sign-out after failed token exchange also failed");
        }
        self.reset_to_failed(&error).await;
        error
    }

    /// Undo a half-done registration: remove the provider identity that
    /// would otherwise be orphaned. A rollback failure is logged, not
    /// surfaced - the user's retry will see the provider's own answer.
    async fn abort_registration(&self, identity: &Identity, error: AuthError) -> AuthError {
        if let Err(e) = self.provider.delete_account(&identity.uid).await {
            tracing::warn!(uid = %identity.uid, error = %e, "Rollback of provider identity failed");
        }
        self.reset_to_failed(&error).await;
        error
    }

    async fn reset_to_failed(&self, error: &AuthError) {
        if let Err(e) = self.tokens.clear().await {
            tracing::warn!(error = %e, "Failed to clear persisted token");
        }
        self.state.send_modify(|s| {
            s.identity = None;
            s.token = None;
            s.last_error = Some(error.to_string());
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::provider::mock::MockProvider;
    use crate::provider::ProviderError;
    use crate::store::MemoryTokenStore;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Harness {
        provider: Arc<MockProvider>,
        tokens: Arc<MemoryTokenStore>,
        store: Arc<SessionStore>,
    }

    fn harness(server_uri: Option<&str>) -> Harness {
        let provider = Arc::new(MockProvider::new());
        let tokens = Arc::new(MemoryTokenStore::new());
        let config = ApiConfig {
            base_url: server_uri.map(|u| u.to_string()),
        };
        let api = Arc::new(ApiClient::new(&config, tokens.clone()));
        let store = SessionStore::new(provider.clone(), api, tokens.clone());
        Harness {
            provider,
            tokens,
            store,
        }
    }

    async fn mount_token_endpoint(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/jwt"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": "tok-1"})),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_session_starts_loading_until_first_delivery() {
        let h = harness(None);
        assert!(h.store.current().loading);

        h.provider.emit(ProviderState::SignedOut);
        let mut rx = h.store.subscribe();
        let session = rx.wait_for(|s| !s.loading).await.unwrap().clone();
        assert!(!session.is_authenticated());
        assert!(session.token.is_none());
    }

    #[tokio::test]
    async fn test_loading_flips_false_only_once() {
        let h = harness(None);
        let mut rx = h.store.subscribe();

        h.provider.emit(ProviderState::SignedOut);
        rx.wait_for(|s| !s.loading).await.unwrap();

        h.provider
            .emit(ProviderState::SignedIn(Identity::new("uid-1", "a@b.com")));
        let session = rx.wait_for(|s| s.is_authenticated()).await.unwrap().clone();
        assert!(!session.loading);
    }

    #[tokio::test]
    async fn test_login_establishes_identity_and_token() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server).await;

        let h = harness(Some(&server.uri()));
        let session = h.store.login("amina@example.com", "pw").await.unwrap();

        assert_eq!(session.email(), Some("amina@example.com"));
        assert_eq!(session.token.as_deref(), Some("tok-1"));
        assert!(session.last_error.is_none());
        assert_eq!(h.tokens.get().await.as_deref(), Some("tok-1"));
    }

    #[tokio::test]
    async fn test_login_provider_rejection_keeps_identity_unset() {
        let h = harness(None);
        h.provider
            .fail_sign_in(ProviderError::Rejected("INVALID_PASSWORD".to_string()));

        let err = h.store.login("amina@example.com", "bad").await.unwrap_err();
        assert_eq!(err.to_string(), "INVALID_PASSWORD");

        let session = h.store.current();
        assert!(!session.is_authenticated());
        assert_eq!(session.last_error.as_deref(), Some("INVALID_PASSWORD"));
    }

    #[tokio::test]
    async fn test_login_token_exchange_failure_reverts_identity() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/jwt"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"message": "jwt mint failed"})),
            )
            .mount(&server)
            .await;

        let h = harness(Some(&server.uri()));
        let err = h.store.login("amina@example.com", "pw").await.unwrap_err();
        assert!(err.to_string().contains("jwt mint failed"));

        // no partial state: neither identity-only nor token-only survives
        let mut rx = h.store.subscribe();
        let session = rx
            .wait_for(|s| !s.is_authenticated() && s.last_error.is_some())
            .await
            .unwrap()
            .clone();
        assert!(session.token.is_none());
        assert_eq!(h.tokens.get().await, None);
        assert_eq!(*h.provider.watch().borrow(), ProviderState::SignedOut);
    }

    #[tokio::test]
    async fn test_register_creates_student_record_and_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "u1",
                "name": "Amina",
                "email": "amina@example.com",
                "role": "student"
            })))
            .mount(&server)
            .await;
        mount_token_endpoint(&server).await;

        let h = harness(Some(&server.uri()));
        let session = h
            .store
            .register("Amina", "amina@example.com", "pw", None)
            .await
            .unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.token.as_deref(), Some("tok-1"));
        let requests = server.received_requests().await.unwrap();
        let user_create = requests.iter().find(|r| r.url.path() == "/users").unwrap();
        let body: serde_json::Value = serde_json::from_slice(&user_create.body).unwrap();
        assert_eq!(body["role"], "student");
    }

    #[tokio::test]
    async fn test_register_backend_failure_rolls_back_provider_identity() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(serde_json::json!({"message": "email already registered"})),
            )
            .mount(&server)
            .await;

        let h = harness(Some(&server.uri()));
        let err = h
            .store
            .register("Amina", "amina@example.com", "pw", None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("email already registered"));

        assert_eq!(h.provider.deleted_uids(), vec!["uid-mock".to_string()]);
        let mut rx = h.store.subscribe();
        let session = rx
            .wait_for(|s| !s.is_authenticated() && s.last_error.is_some())
            .await
            .unwrap()
            .clone();
        assert!(session.token.is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_local_state_even_when_provider_fails() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server).await;

        let h = harness(Some(&server.uri()));
        h.store.login("amina@example.com", "pw").await.unwrap();
        // let the listener drain the provider's sign-in delivery first
        let mut rx = h.store.subscribe();
        rx.wait_for(|s| s.is_authenticated()).await.unwrap();
        h.provider
            .fail_sign_out(ProviderError::Transport("network down".to_string()));

        let err = h.store.logout().await.unwrap_err();
        assert!(matches!(err, AuthError::SignOut(_)));

        // the pinned behavior: the failure is reported, local state is gone
        let session = h.store.current();
        assert!(!session.is_authenticated());
        assert!(session.token.is_none());
        assert_eq!(h.tokens.get().await, None);
    }

    #[tokio::test]
    async fn test_passive_signed_out_clears_token() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server).await;

        let h = harness(Some(&server.uri()));
        h.store.login("amina@example.com", "pw").await.unwrap();
        assert_eq!(h.tokens.get().await.as_deref(), Some("tok-1"));

        h.provider.emit(ProviderState::SignedOut);
        let mut rx = h.store.subscribe();
        let session = rx
            .wait_for(|s| !s.is_authenticated() && !s.loading)
            .await
            .unwrap()
            .clone();
        assert!(session.token.is_none());
        assert_eq!(h.tokens.get().await, None);
    }
}
