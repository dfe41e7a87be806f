use async_trait::async_trait;
use thiserror::Error;

use crate::registration::{AuthTokens, RegistrationRequest};

/// Errors from the registration endpoint.
///
/// Keeps the server-rejection / transport-failure split: callers branch
/// differently on each ("the backend said no" vs "we never got an answer").
#[derive(Debug, Error)]
pub enum RegistrationApiError {
    /// The backend responded with a non-2xx status.
    #[error("registration rejected ({status}): {body}")]
    Api { status: u16, body: String },

    /// The request or response parsing failed (network, DNS, TLS, JSON).
    #[error("registration transport failed: {0}")]
    Transport(String),
}

#[async_trait]
pub trait RegistrationApiPort: Send + Sync {
    /// Register (or re-register) the session with the backend.
    async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<AuthTokens, RegistrationApiError>;
}
