//! First-run registration service.
//!
//! Exchanges the locally minted identity for backend credentials. One
//! policy here is inherited from the product and deliberately kept: when
//! the backend call fails, the user is still marked as registered so that
//! bootstrap never loops on every launch; only the explicit reauth flow
//! retries after that. A missing billing identity is the one case that
//! fails without marking, because no safe identity exists to register.

use std::sync::Arc;

use tracing::{debug, info, warn};

use aishou_core::ports::{
    BillingIdentityPort, LocalePort, RegistrationApiError, RegistrationApiPort, StorageError,
};
use aishou_core::registration::RegistrationRequest;

use crate::session_manager::SessionManager;

/// Errors from a registration attempt.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    /// The purchase SDK has not produced an identity yet; the attempt is
    /// abandoned without retry and without marking.
    #[error("no billing identity available")]
    MissingBillingIdentity,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Api(#[from] RegistrationApiError),
}

pub struct RegistrationService {
    sessions: Arc<SessionManager>,
    api: Arc<dyn RegistrationApiPort>,
    billing: Arc<dyn BillingIdentityPort>,
    locale: Arc<dyn LocalePort>,
}

impl RegistrationService {
    pub fn new(
        sessions: Arc<SessionManager>,
        api: Arc<dyn RegistrationApiPort>,
        billing: Arc<dyn BillingIdentityPort>,
        locale: Arc<dyn LocalePort>,
    ) -> Self {
        Self {
            sessions,
            api,
            billing,
            locale,
        }
    }

    /// Startup entry point: registers once if this session never has.
    pub async fn initialize(&self) -> Result<(), RegistrationError> {
        self.register_if_needed().await
    }

    /// Register only when the session is first-time or has no identity.
    pub async fn register_if_needed(&self) -> Result<(), RegistrationError> {
        let session = self.sessions.session().await?;
        if session.is_first_time_user || session.user_id.is_none() {
            self.register_user().await
        } else {
            // registered sessions still record the launch
            self.sessions.handle_app_start().await?;
            debug!("session already registered, skipping registration");
            Ok(())
        }
    }

    /// Re-run registration unconditionally. Used by the reauth flow.
    pub async fn force_reregister(&self) -> Result<(), RegistrationError> {
        self.register_user().await
    }

    /// Not first-time and carrying a local identity.
    pub async fn is_user_registered(&self) -> Result<bool, StorageError> {
        let session = self.sessions.session().await?;
        Ok(!session.is_first_time_user && session.user_id.is_some())
    }

    async fn register_user(&self) -> Result<(), RegistrationError> {
        self.sessions.handle_app_start().await?;

        let Some(billing_id) = self.billing.app_user_id().await else {
            warn!("billing identity unavailable, abandoning registration");
            return Err(RegistrationError::MissingBillingIdentity);
        };

        let request = RegistrationRequest::anonymous(billing_id, self.locale.language());

        match self.api.register(&request).await {
            Ok(tokens) => {
                self.sessions.store_tokens(&tokens).await?;
                self.sessions.mark_registered().await?;
                info!("registration succeeded");
                Ok(())
            }
            Err(error) => {
                // availability over consistency: mark anyway so bootstrap
                // never loops, and leave the retry to the reauth flow
                self.sessions.mark_registered().await?;
                warn!(%error, "registration failed, session marked registered without tokens");
                Err(error.into())
            }
        }
    }
}
