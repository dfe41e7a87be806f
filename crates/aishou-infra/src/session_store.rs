//! File-based session store
//!
//! This module provides a file-based implementation of the
//! SessionStorePort, persisting the user session to a local JSON file in
//! the application data directory.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use aishou_core::ports::{SessionStorePort, StorageError};
use aishou_core::session::UserSession;

pub const DEFAULT_SESSION_FILE: &str = ".user_session";

pub struct FileSessionStore {
    session_file_path: PathBuf,
}

impl FileSessionStore {
    /// Create a store with a custom file path
    pub fn new(session_file_path: PathBuf) -> Self {
        Self { session_file_path }
    }

    /// Create a store with base dir and filename
    pub fn with_base_dir(base_dir: PathBuf, filename: impl Into<String>) -> Self {
        Self {
            session_file_path: base_dir.join(filename.into()),
        }
    }

    /// Create a store with defaults under the given base dir
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self {
            session_file_path: base_dir.join(DEFAULT_SESSION_FILE),
        }
    }

    /// Create a store under the platform data directory.
    pub fn in_data_dir(app_name: &str) -> Option<Self> {
        dirs::data_dir().map(|dir| Self::with_defaults(dir.join(app_name)))
    }

    async fn ensure_parent_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.session_file_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::Io(format!("create session dir failed: {}", e)))?;
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStorePort for FileSessionStore {
    async fn load(&self) -> Result<UserSession, StorageError> {
        if !self.session_file_path.exists() {
            return Ok(UserSession::default());
        }

        let content = fs::read_to_string(&self.session_file_path)
            .await
            .map_err(|e| StorageError::Io(format!("read session file failed: {}", e)))?;

        if content.trim().is_empty() {
            return Ok(UserSession::default());
        }

        let session: UserSession = serde_json::from_str(&content)
            .map_err(|e| StorageError::Corrupt(format!("failed to parse session: {}", e)))?;

        Ok(session)
    }

    async fn save(&self, session: &UserSession) -> Result<(), StorageError> {
        self.ensure_parent_dir().await?;

        let json = serde_json::to_string_pretty(session)
            .map_err(|e| StorageError::Corrupt(format!("failed to serialize session: {}", e)))?;

        let mut file = fs::File::create(&self.session_file_path)
            .await
            .map_err(|e| StorageError::Io(format!("failed to create session file: {}", e)))?;

        file.write_all(json.as_bytes())
            .await
            .map_err(|e| StorageError::Io(format!("failed to write session file: {}", e)))?;

        file.sync_all()
            .await
            .map_err(|e| StorageError::Io(format!("failed to sync session file: {}", e)))?;

        Ok(())
    }

    async fn reset(&self) -> Result<(), StorageError> {
        if self.session_file_path.exists() {
            fs::remove_file(&self.session_file_path)
                .await
                .map_err(|e| StorageError::Io(format!("failed to remove session file: {}", e)))?;
        }
        Ok(())
    }
}
