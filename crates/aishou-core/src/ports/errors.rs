use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("session store failed: {0}")]
    Io(String),

    #[error("session data corrupt: {0}")]
    Corrupt(String),
}
