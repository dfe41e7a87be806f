//! Startup orchestrator.
//!
//! Sequences language init, first-run registration and push-gateway init.
//! Registration is awaited on its actual completion before the push
//! gateway starts, because push association needs the backend user to
//! exist; the push work itself is dispatched as a detached best-effort
//! task that can never block or fail app readiness. Any failure in the
//! sequence degrades the session (possibly unauthenticated) instead of
//! crashing the process.

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use aishou_core::ports::{LocalePort, PushGatewayPort};
use aishou_core::session::AuthStatus;

use crate::registration::RegistrationService;
use crate::session_manager::SessionManager;

/// Run a background task whose outcome is irrelevant to app readiness.
///
/// The task is detached; a supervisor only logs its failure.
pub fn spawn_best_effort<F>(task: &'static str, fut: F) -> JoinHandle<()>
where
    F: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(error) = fut.await {
            warn!(task, %error, "best-effort background task failed");
        }
    })
}

pub struct AppBootstrap {
    sessions: Arc<SessionManager>,
    registration: Arc<RegistrationService>,
    push: Arc<dyn PushGatewayPort>,
    locale: Arc<dyn LocalePort>,
}

impl AppBootstrap {
    pub fn new(
        sessions: Arc<SessionManager>,
        registration: Arc<RegistrationService>,
        push: Arc<dyn PushGatewayPort>,
        locale: Arc<dyn LocalePort>,
    ) -> Self {
        Self {
            sessions,
            registration,
            push,
            locale,
        }
    }

    /// Run the startup sequence. Never fails; every error is logged and
    /// the app proceeds in a degraded state.
    ///
    /// Returns the handle of the detached push-gateway task. Callers are
    /// free to drop it; tests await it.
    pub async fn initialize(&self) -> JoinHandle<()> {
        info!("bootstrap starting");

        if let Err(error) = self.locale.initialize() {
            warn!(%error, "language init failed, continuing with defaults");
        }

        if let Err(error) = self.registration.initialize().await {
            warn!(%error, "registration failed during bootstrap, continuing unauthenticated");
        }

        // push association needs the registration outcome, so it starts
        // only after the await above
        let push = Arc::clone(&self.push);
        let handle = spawn_best_effort("push gateway init", async move {
            push.initialize().await?;
            push.sync_subscriber_id().await
        });

        info!("bootstrap ready");
        handle
    }

    /// Derive the authentication status for the UI, never failing.
    pub async fn check_auth_status(&self) -> AuthStatus {
        match self.sessions.has_valid_authentication().await {
            Ok(true) => AuthStatus::Authenticated,
            Ok(false) => match self.sessions.should_attempt_reauth().await {
                Ok(true) => AuthStatus::NeedsReauth,
                Ok(false) => AuthStatus::ReauthBlocked,
                Err(error) => AuthStatus::Error(error.to_string()),
            },
            Err(error) => AuthStatus::Error(error.to_string()),
        }
    }

    /// Drop credentials after a 401-class failure. Returns false instead
    /// of erroring on internal failure.
    pub async fn handle_unauthorized_user(&self) -> bool {
        match self.sessions.handle_unauthorized_user().await {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, "failed to clear credentials");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use aishou_core::ports::{
        BillingIdentityPort, ClockPort, RegistrationApiError, RegistrationApiPort,
        SessionStorePort, StorageError,
    };
    use aishou_core::registration::{AuthTokens, RegistrationRequest};
    use aishou_core::session::{ReauthPolicy, UserSession};

    struct InMemorySessionStore {
        session: Mutex<UserSession>,
    }

    impl InMemorySessionStore {
        fn new() -> Self {
            Self {
                session: Mutex::new(UserSession::default()),
            }
        }
    }

    #[async_trait::async_trait]
    impl SessionStorePort for InMemorySessionStore {
        async fn load(&self) -> Result<UserSession, StorageError> {
            Ok(self.session.lock().unwrap().clone())
        }

        async fn save(&self, session: &UserSession) -> Result<(), StorageError> {
            *self.session.lock().unwrap() = session.clone();
            Ok(())
        }

        async fn reset(&self) -> Result<(), StorageError> {
            *self.session.lock().unwrap() = UserSession::default();
            Ok(())
        }
    }

    struct FixedClock(i64);

    impl ClockPort for FixedClock {
        fn now_ms(&self) -> i64 {
            self.0
        }
    }

    type StepLog = Arc<Mutex<Vec<&'static str>>>;

    struct RecordingApi {
        steps: StepLog,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl RegistrationApiPort for RecordingApi {
        async fn register(
            &self,
            _request: &RegistrationRequest,
        ) -> Result<AuthTokens, RegistrationApiError> {
            self.steps.lock().unwrap().push("register");
            if self.fail {
                Err(RegistrationApiError::Transport("offline".into()))
            } else {
                Ok(AuthTokens {
                    token: "t1".into(),
                    refresh_token: "r1".into(),
                })
            }
        }
    }

    struct RecordingPush {
        steps: StepLog,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl PushGatewayPort for RecordingPush {
        async fn initialize(&self) -> anyhow::Result<()> {
            self.steps.lock().unwrap().push("push-init");
            if self.fail {
                anyhow::bail!("push sdk unavailable");
            }
            Ok(())
        }

        async fn sync_subscriber_id(&self) -> anyhow::Result<()> {
            self.steps.lock().unwrap().push("push-sync");
            Ok(())
        }
    }

    struct StubBilling;

    #[async_trait::async_trait]
    impl BillingIdentityPort for StubBilling {
        async fn app_user_id(&self) -> Option<String> {
            Some("rc-1".into())
        }
    }

    struct EnglishLocale;

    impl LocalePort for EnglishLocale {
        fn initialize(&self) -> anyhow::Result<()> {
            Ok(())
        }

        fn language(&self) -> String {
            "en".into()
        }
    }

    fn bootstrap_with(
        store: Arc<InMemorySessionStore>,
        steps: StepLog,
        api_fails: bool,
        push_fails: bool,
    ) -> AppBootstrap {
        let sessions = Arc::new(SessionManager::new(
            store,
            Arc::new(FixedClock(0)),
            ReauthPolicy::default(),
        ));
        let registration = Arc::new(RegistrationService::new(
            sessions.clone(),
            Arc::new(RecordingApi {
                steps: steps.clone(),
                fail: api_fails,
            }),
            Arc::new(StubBilling),
            Arc::new(EnglishLocale),
        ));
        AppBootstrap::new(
            sessions,
            registration,
            Arc::new(RecordingPush {
                steps,
                fail: push_fails,
            }),
            Arc::new(EnglishLocale),
        )
    }

    #[tokio::test]
    async fn push_init_runs_only_after_registration_completes() {
        let steps: StepLog = Arc::new(Mutex::new(Vec::new()));
        let store = Arc::new(InMemorySessionStore::new());
        let bootstrap = bootstrap_with(store, steps.clone(), false, false);

        let push_task = bootstrap.initialize().await;
        push_task.await.unwrap();

        assert_eq!(
            *steps.lock().unwrap(),
            vec!["register", "push-init", "push-sync"]
        );
    }

    #[tokio::test]
    async fn push_failure_is_swallowed_and_app_stays_authenticated() {
        let steps: StepLog = Arc::new(Mutex::new(Vec::new()));
        let store = Arc::new(InMemorySessionStore::new());
        let bootstrap = bootstrap_with(store, steps.clone(), false, true);

        let push_task = bootstrap.initialize().await;
        push_task.await.unwrap();

        assert_eq!(*steps.lock().unwrap(), vec!["register", "push-init"]);
        assert_eq!(bootstrap.check_auth_status().await, AuthStatus::Authenticated);
    }

    #[tokio::test]
    async fn failed_registration_degrades_to_needs_reauth() {
        let steps: StepLog = Arc::new(Mutex::new(Vec::new()));
        let store = Arc::new(InMemorySessionStore::new());
        let bootstrap = bootstrap_with(store, steps, true, false);

        let push_task = bootstrap.initialize().await;
        push_task.await.unwrap();

        assert_eq!(bootstrap.check_auth_status().await, AuthStatus::NeedsReauth);
    }

    #[tokio::test]
    async fn blocked_gate_reports_reauth_blocked() {
        let steps: StepLog = Arc::new(Mutex::new(Vec::new()));
        let store = Arc::new(InMemorySessionStore::new());
        {
            let mut session = store.session.lock().unwrap();
            session.is_first_time_user = false;
            session.user_id = Some("u1".into());
            session.auth_attempt_count = 3;
        }
        let bootstrap = bootstrap_with(store, steps, false, false);

        assert_eq!(bootstrap.check_auth_status().await, AuthStatus::ReauthBlocked);
    }

    #[tokio::test]
    async fn unauthorized_handling_clears_tokens_and_reports_success() {
        let steps: StepLog = Arc::new(Mutex::new(Vec::new()));
        let store = Arc::new(InMemorySessionStore::new());
        let bootstrap = bootstrap_with(store.clone(), steps, false, false);

        bootstrap.initialize().await.await.unwrap();
        assert_eq!(bootstrap.check_auth_status().await, AuthStatus::Authenticated);

        assert!(bootstrap.handle_unauthorized_user().await);
        assert_eq!(bootstrap.check_auth_status().await, AuthStatus::NeedsReauth);
        let session = store.load().await.unwrap();
        assert!(session.user_id.is_some());
    }
}
