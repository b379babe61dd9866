//! Identity model
//!
//! The externally-issued user record: the identity provider's notion of
//! "who". Mirrored here, never owned - the provider remains the source of
//! truth for these fields.

use serde::{Deserialize, Serialize};

/// Provider-issued identity for the currently acting user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque provider-assigned user id
    pub uid: String,
    /// Email address registered with the provider
    pub email: String,
    /// Display name, if the provider holds one
    pub display_name: Option<String>,
    /// Profile photo URL, if the provider holds one
    pub photo_url: Option<String>,
}

impl Identity {
    /// Create an identity with only the required fields set.
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            display_name: None,
            photo_url: None,
        }
    }
}
