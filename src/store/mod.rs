//! Token persistence
//!
//! The one piece of client state that outlives a process: the application-
//! issued bearer token, stored under a single well-known location. The token
//! is read at the start of every outgoing request and written only by
//! login/register (set) and logout or a provider signed-out callback
//! (clear).

pub mod file;
pub mod memory;

use async_trait::async_trait;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

/// Storage for the application token.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Read the persisted token, if one exists.
    async fn get(&self) -> Option<String>;

    /// Persist a token, replacing any previous one.
    async fn set(&self, token: &str) -> anyhow::Result<()>;

    /// Remove the persisted token. Removing an absent token is not an error.
    async fn clear(&self) -> anyhow::Result<()>;
}
