//! Scriptable identity provider for tests

use async_trait::async_trait;
use std::sync::Mutex;
use tokio::sync::watch;

use crate::models::Identity;
use crate::provider::{IdentityProvider, ProviderError, ProviderState};

/// Test provider whose outcomes are scripted per call.
pub struct MockProvider {
    state: watch::Sender<ProviderState>,
    sign_in_error: Mutex<Option<ProviderError>>,
    sign_up_error: Mutex<Option<ProviderError>>,
    sign_out_error: Mutex<Option<ProviderError>>,
    delete_error: Mutex<Option<ProviderError>>,
    deleted_uids: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new() -> Self {
        let (state, _) = watch::channel(ProviderState::Unknown);
        Self {
            state,
            sign_in_error: Mutex::new(None),
            sign_up_error: Mutex::new(None),
            sign_out_error: Mutex::new(None),
            delete_error: Mutex::new(None),
            deleted_uids: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_sign_in(&self, error: ProviderError) {
        *self.sign_in_error.lock().unwrap() = Some(error);
    }

    pub fn fail_sign_up(&self, error: ProviderError) {
        *self.sign_up_error.lock().unwrap() = Some(error);
    }

    pub fn fail_sign_out(&self, error: ProviderError) {
        *self.sign_out_error.lock().unwrap() = Some(error);
    }

    pub fn fail_delete(&self, error: ProviderError) {
        *self.delete_error.lock().unwrap() = Some(error);
    }

    /// Drive a passive state delivery, as the real provider would at
    /// unpredictable times.
    pub fn emit(&self, state: ProviderState) {
        self.state.send_replace(state);
    }

    /// Uids passed to `delete_account`, in call order.
    pub fn deleted_uids(&self) -> Vec<String> {
        self.deleted_uids.lock().unwrap().clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for MockProvider {
    async fn sign_in(&self, email: &str, _password: &str) -> Result<Identity, ProviderError> {
        if let Some(err) = self.sign_in_error.lock().unwrap().take() {
            return Err(err);
        }
        let identity = Identity::new("uid-mock", email);
        self.state
            .send_replace(ProviderState::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn sign_up(
        &self,
        name: &str,
        email: &str,
        _password: &str,
        photo_url: Option<&str>,
    ) -> Result<Identity, ProviderError> {
        if let Some(err) = self.sign_up_error.lock().unwrap().take() {
            return Err(err);
        }
        let identity = Identity {
            uid: "uid-mock".to_string(),
            email: email.to_string(),
            display_name: Some(name.to_string()),
            photo_url: photo_url.map(|p| p.to_string()),
        };
        self.state
            .send_replace(ProviderState::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        if let Some(err) = self.sign_out_error.lock().unwrap().take() {
            return Err(err);
        }
        self.state.send_replace(ProviderState::SignedOut);
        Ok(())
    }

    async fn delete_account(&self, uid: &str) -> Result<(), ProviderError> {
        if let Some(err) = self.delete_error.lock().unwrap().take() {
            return Err(err);
        }
        self.deleted_uids.lock().unwrap().push(uid.to_string());
        self.state.send_replace(ProviderState::SignedOut);
        Ok(())
    }

    fn watch(&self) -> watch::Receiver<ProviderState> {
        self.state.subscribe()
    }
}
