//! Reauthentication flow driver.
//!
//! Runs the pure reauth state machine with its side effects: gate
//! evaluation, attempt bookkeeping, forced re-registration, event emission
//! and display pacing. One instance drives one screen visit; transitions
//! are single-threaded and not reentrant. Progress updates during
//! re-registration are synthetic and exist only so the UI has something
//! to animate.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use aishou_core::ports::{NavigationEvent, ReauthEventPort, StorageError};
use aishou_core::reauth::{ReauthAction, ReauthError, ReauthEvent, ReauthState, ReauthStateMachine};

use crate::registration::RegistrationService;
use crate::session_manager::SessionManager;

/// UX pacing delays. Tests run them under paused time.
#[derive(Debug, Clone, Copy)]
pub struct ReauthPacing {
    /// Pause before the gate check, so the checking screen is visible.
    pub check_delay: Duration,
    /// Interval between synthetic progress updates.
    pub progress_step: Duration,
    /// How long the success screen stays before navigating home.
    pub success_display: Duration,
}

impl Default for ReauthPacing {
    fn default() -> Self {
        Self {
            check_delay: Duration::from_millis(500),
            progress_step: Duration::from_millis(150),
            success_display: Duration::from_millis(1200),
        }
    }
}

pub struct ReauthFlow {
    sessions: Arc<SessionManager>,
    registration: Arc<RegistrationService>,
    events: Arc<dyn ReauthEventPort>,
    state: tokio::sync::Mutex<ReauthState>,
    pacing: ReauthPacing,
}

impl ReauthFlow {
    pub fn new(
        sessions: Arc<SessionManager>,
        registration: Arc<RegistrationService>,
        events: Arc<dyn ReauthEventPort>,
        pacing: ReauthPacing,
    ) -> Self {
        Self {
            sessions,
            registration,
            events,
            state: tokio::sync::Mutex::new(ReauthState::Checking),
            pacing,
        }
    }

    pub async fn state(&self) -> ReauthState {
        self.state.lock().await.clone()
    }

    /// Enter the flow: pace, consult the gate, and either re-register or
    /// surface the refusal.
    pub async fn start(&self) {
        sleep(self.pacing.check_delay).await;
        self.check_and_run().await;
    }

    /// User-initiated retry. Re-enters checking only while the gate still
    /// allows it; otherwise the error message is rewritten in place
    /// without another attempt.
    pub async fn retry(&self) {
        match self.sessions.reauth_gate().await {
            Ok(Ok(())) => {
                self.dispatch(ReauthEvent::RetryAllowed).await;
                sleep(self.pacing.check_delay).await;
                self.check_and_run().await;
            }
            Ok(Err(refusal)) => {
                let can_retry = self.can_retry().await;
                self.apply(ReauthEvent::RetryRefused { refusal, can_retry })
                    .await;
            }
            Err(error) => self.fail_unexpected(error).await,
        }
    }

    /// Pure navigation; no backend interaction.
    pub async fn navigate_to_support(&self) {
        self.apply(ReauthEvent::SupportRequested).await;
    }

    async fn check_and_run(&self) {
        match self.sessions.reauth_gate().await {
            Ok(Ok(())) => {
                let actions = self.dispatch(ReauthEvent::GateAllowed).await;
                if self.run_actions(actions).await {
                    self.reregister().await;
                }
            }
            Ok(Err(refusal)) => {
                let can_retry = self.can_retry().await;
                self.apply(ReauthEvent::GateRefused { refusal, can_retry })
                    .await;
            }
            Err(error) => self.fail_unexpected(error).await,
        }
    }

    async fn reregister(&self) {
        for progress in [20u8, 45, 70, 90] {
            sleep(self.pacing.progress_step).await;
            self.dispatch(ReauthEvent::ProgressTick { progress }).await;
        }

        let outcome = self.registration.force_reregister().await;
        let verified = match &outcome {
            Ok(()) => self
                .sessions
                .has_valid_authentication()
                .await
                .unwrap_or(false),
            Err(_) => false,
        };

        if verified {
            self.apply(ReauthEvent::RegistrationVerified).await;
            sleep(self.pacing.success_display).await;
            self.apply(ReauthEvent::SuccessDisplayed).await;
        } else {
            if let Err(error) = outcome {
                warn!(%error, "re-registration failed");
            }
            let can_retry = self.can_retry().await;
            self.apply(ReauthEvent::RegistrationFailed {
                error: ReauthError::RegistrationFailed,
                can_retry,
            })
            .await;
        }
    }

    async fn fail_unexpected(&self, error: StorageError) {
        warn!(%error, "reauth flow hit an unexpected failure");
        let can_retry = self.can_retry().await;
        self.apply(ReauthEvent::RegistrationFailed {
            error: ReauthError::Unexpected(error.to_string()),
            can_retry,
        })
        .await;
    }

    async fn can_retry(&self) -> bool {
        self.sessions.can_retry().await.unwrap_or(false)
    }

    /// Transition and execute every resulting action.
    async fn apply(&self, event: ReauthEvent) {
        let actions = self.dispatch(event).await;
        self.run_actions(actions).await;
    }

    /// Transition the machine and publish the new state.
    async fn dispatch(&self, event: ReauthEvent) -> Vec<ReauthAction> {
        let (next, actions) = {
            let mut state = self.state.lock().await;
            let (next, actions) = ReauthStateMachine::transition(state.clone(), event);
            *state = next.clone();
            (next, actions)
        };
        debug!(state = ?next, "reauth state changed");
        self.events.state_changed(next).await;
        actions
    }

    /// Execute simple actions; returns whether re-registration should run.
    async fn run_actions(&self, actions: Vec<ReauthAction>) -> bool {
        let mut begin = false;
        for action in actions {
            let outcome = match action {
                ReauthAction::MarkAuthAttempt => self.sessions.mark_auth_attempt().await,
                ReauthAction::ResetAuthAttempts => self.sessions.reset_auth_attempts().await,
                ReauthAction::BeginReregistration => {
                    begin = true;
                    Ok(())
                }
                ReauthAction::NavigateHome => {
                    self.events.navigate(NavigationEvent::Home).await;
                    Ok(())
                }
                ReauthAction::NavigateSupport => {
                    self.events.navigate(NavigationEvent::Support).await;
                    Ok(())
                }
            };
            if let Err(error) = outcome {
                warn!(%error, ?action, "reauth side effect failed");
            }
        }
        begin
    }
}
