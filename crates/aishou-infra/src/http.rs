//! REST client for the registration endpoint.
//!
//! Wraps `POST /v1/auth/register` using [`reqwest`]. Non-2xx responses
//! and transport failures stay distinguishable for the callers that
//! branch differently on them.

use std::time::Duration;

use async_trait::async_trait;

use aishou_core::ports::{RegistrationApiError, RegistrationApiPort};
use aishou_core::registration::{AuthTokens, RegistrationRequest};

const REGISTER_PATH: &str = "/v1/auth/register";

/// HTTP client for the Aishou backend registration endpoint.
pub struct HttpRegistrationApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRegistrationApi {
    /// Create a new client.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `https://api.aishou.app`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling with other backend calls).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

fn transport(error: reqwest::Error) -> RegistrationApiError {
    RegistrationApiError::Transport(error.to_string())
}

#[async_trait]
impl RegistrationApiPort for HttpRegistrationApi {
    async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<AuthTokens, RegistrationApiError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, REGISTER_PATH))
            .json(request)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if status.is_success() {
            response.json::<AuthTokens>().await.map_err(transport)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(RegistrationApiError::Api {
                status: status.as_u16(),
                body,
            })
        }
    }
}
