//! Session model
//!
//! The application's local view of the current identity plus its issued
//! application token. A session starts in `loading` until the identity
//! provider delivers its first state callback; from then on exactly one of
//! {identity present, identity absent} holds.

use serde::{Deserialize, Serialize};

use crate::models::Identity;

/// Local session state surfaced to every screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Current identity, if the provider reports one
    pub identity: Option<Identity>,
    /// Application-issued bearer token, if one has been exchanged
    pub token: Option<String>,
    /// True until the provider delivers its first state callback
    pub loading: bool,
    /// Message of the most recent auth failure, if any
    pub last_error: Option<String>,
}

impl Session {
    /// The state a session is created in at process start.
    pub fn initial() -> Self {
        Self {
            identity: None,
            token: None,
            loading: true,
            last_error: None,
        }
    }

    /// Whether an identity is currently established.
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Email of the current identity, if any.
    pub fn email(&self) -> Option<&str> {
        self.identity.as_ref().map(|i| i.email.as_str())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_session_is_loading() {
        let session = Session::initial();
        assert!(session.loading);
        assert!(!session.is_authenticated());
        assert!(session.token.is_none());
        assert!(session.last_error.is_none());
    }

    #[test]
    fn test_email_mirrors_identity() {
        let mut session = Session::initial();
        assert_eq!(session.email(), None);
        session.identity = Some(Identity::new("uid-1", "a@b.com"));
        assert_eq!(session.email(), Some("a@b.com"));
    }
}
