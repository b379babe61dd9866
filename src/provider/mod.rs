//! External identity provider
//!
//! The provider owns credentials and identity records; this client consumes
//! it through a trait seam. Its asynchronous state callback is modeled as a
//! watch subscription: an explicit initial `Unknown`, then
//! `SignedIn`/`SignedOut` events at whatever times the provider delivers
//! them. The session store consumes `Unknown` exactly once to leave its
//! loading state.

pub mod rest;

#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::models::Identity;

pub use rest::RestIdentityProvider;

/// What the provider currently reports about the acting user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProviderState {
    /// No delivery yet; consumers must treat the session as undetermined
    #[default]
    Unknown,
    /// An identity is active
    SignedIn(Identity),
    /// No identity is active
    SignedOut,
}

/// Error raised by provider calls.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// Provider endpoint or key absent from configuration
    #[error("Identity provider is not configured")]
    NotConfigured,

    /// The provider rejected the operation; message is surfaced verbatim
    #[error("{0}")]
    Rejected(String),

    /// The provider could not be reached
    #[error("Provider request failed: {0}")]
    Transport(String),
}

/// The external identity provider, behind its documented call shape.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange credentials for an active identity.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, ProviderError>;

    /// Create a provider identity with profile fields attached.
    async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
        photo_url: Option<&str>,
    ) -> Result<Identity, ProviderError>;

    /// End the active provider session.
    async fn sign_out(&self) -> Result<(), ProviderError>;

    /// Remove a provider identity. Used as the compensating step when a
    /// registration fails after the identity was already created.
    async fn delete_account(&self, uid: &str) -> Result<(), ProviderError>;

    /// Subscribe to the provider's state deliveries.
    fn watch(&self) -> watch::Receiver<ProviderState>;
}
