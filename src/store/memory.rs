//! In-memory token store
//!
//! Ephemeral sessions and tests. Nothing survives the process.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::store::TokenStore;

/// Token store backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        // A poisoned lock still holds a usable Option.
        self.token.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self) -> Option<String> {
        self.slot().clone()
    }

    async fn set(&self, token: &str) -> anyhow::Result<()> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        *self.slot() = None;
        Ok(())
    }
}
