//! Session store port
//!
//! This port defines the contract for persisting and retrieving the user
//! session. Implementations are provided by the infrastructure layer
//! (e.g., file-based storage).

use async_trait::async_trait;

use crate::ports::errors::StorageError;
use crate::session::UserSession;

#[async_trait]
pub trait SessionStorePort: Send + Sync {
    /// Load the stored session. An absent or empty store yields the
    /// defaulted session, not an error.
    async fn load(&self) -> Result<UserSession, StorageError>;

    /// Persist the session. Must be idempotent (overwrite if exists).
    async fn save(&self, session: &UserSession) -> Result<(), StorageError>;

    /// Wipe the stored session (full local reset).
    async fn reset(&self) -> Result<(), StorageError>;
}
