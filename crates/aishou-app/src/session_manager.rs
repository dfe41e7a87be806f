//! Session state service.
//!
//! Wraps the session store and clock ports with the operations the
//! bootstrap, registration and reauth flows need: first-run handling,
//! launch history, credential state and reauth-retry bookkeeping.
//!
//! One instance exists per process, owned by the composition root and
//! passed explicitly to every consumer.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use aishou_core::ports::{ClockPort, SessionStorePort, StorageError};
use aishou_core::registration::AuthTokens;
use aishou_core::session::{ReauthPolicy, ReauthRefusal, UserSession};

pub struct SessionManager {
    store: Arc<dyn SessionStorePort>,
    clock: Arc<dyn ClockPort>,
    policy: ReauthPolicy,
}

impl SessionManager {
    pub fn new(
        store: Arc<dyn SessionStorePort>,
        clock: Arc<dyn ClockPort>,
        policy: ReauthPolicy,
    ) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    pub fn policy(&self) -> ReauthPolicy {
        self.policy
    }

    /// Current session snapshot. An empty store yields the default.
    pub async fn session(&self) -> Result<UserSession, StorageError> {
        self.store.load().await
    }

    pub async fn is_first_time_user(&self) -> Result<bool, StorageError> {
        Ok(self.store.load().await?.is_first_time_user)
    }

    pub async fn user_id(&self) -> Result<Option<String>, StorageError> {
        Ok(self.store.load().await?.user_id)
    }

    pub async fn launch_count(&self) -> Result<i64, StorageError> {
        Ok(self.store.load().await?.app_launch_count)
    }

    pub async fn first_launch_ms(&self) -> Result<Option<i64>, StorageError> {
        Ok(self.store.load().await?.first_launch_timestamp)
    }

    /// Record an app start.
    ///
    /// On the first launch this mints the local identity, stamps the first
    /// launch time and initializes the launch count in a single save; on
    /// every later launch it only increments the count.
    pub async fn handle_app_start(&self) -> Result<UserSession, StorageError> {
        let mut session = self.store.load().await?;
        if session.is_first_time_user {
            session.user_id = Some(Uuid::new_v4().to_string());
            session.first_launch_timestamp = Some(self.clock.now_ms());
            session.app_launch_count = 1;
            session.is_first_time_user = false;
            info!(user_id = ?session.user_id, "first launch, minted local identity");
        } else {
            session.app_launch_count += 1;
            debug!(launch_count = session.app_launch_count, "app start");
        }
        self.store.save(&session).await?;
        Ok(session)
    }

    /// Record a reauthentication attempt: bump the counter, stamp the time.
    pub async fn mark_auth_attempt(&self) -> Result<(), StorageError> {
        let mut session = self.store.load().await?;
        session.auth_attempt_count += 1;
        session.last_auth_attempt_timestamp = Some(self.clock.now_ms());
        debug!(
            attempt_count = session.auth_attempt_count,
            "marked reauth attempt"
        );
        self.store.save(&session).await
    }

    /// Clear attempt bookkeeping. Called only after a verified successful
    /// reauthentication.
    pub async fn reset_auth_attempts(&self) -> Result<(), StorageError> {
        let mut session = self.store.load().await?;
        session.auth_attempt_count = 0;
        session.last_auth_attempt_timestamp = None;
        self.store.save(&session).await
    }

    /// Consult the retry gate, keeping the refusal reason.
    pub async fn reauth_gate(&self) -> Result<Result<(), ReauthRefusal>, StorageError> {
        let session = self.store.load().await?;
        Ok(self.policy.evaluate(&session, self.clock.now_ms()))
    }

    pub async fn should_attempt_reauth(&self) -> Result<bool, StorageError> {
        Ok(self.reauth_gate().await?.is_ok())
    }

    /// Whether the attempt cap still leaves room for a manual retry.
    pub async fn can_retry(&self) -> Result<bool, StorageError> {
        let session = self.store.load().await?;
        Ok(self.policy.can_retry(&session))
    }

    pub async fn has_valid_authentication(&self) -> Result<bool, StorageError> {
        Ok(self.store.load().await?.has_valid_authentication())
    }

    /// Persist backend credentials, always as a pair.
    pub async fn store_tokens(&self, tokens: &AuthTokens) -> Result<(), StorageError> {
        let mut session = self.store.load().await?;
        session.set_tokens(&tokens.token, &tokens.refresh_token);
        self.store.save(&session).await
    }

    /// Flip the first-time flag once a registration attempt has run.
    pub async fn mark_registered(&self) -> Result<(), StorageError> {
        let mut session = self.store.load().await?;
        session.is_first_time_user = false;
        self.store.save(&session).await
    }

    /// Drop credentials after a 401-class failure, keeping identity and
    /// launch history so the next bootstrap re-registers without losing
    /// them.
    pub async fn handle_unauthorized_user(&self) -> Result<(), StorageError> {
        let mut session = self.store.load().await?;
        session.clear_tokens();
        info!("cleared credentials after unauthorized response");
        self.store.save(&session).await
    }
}
