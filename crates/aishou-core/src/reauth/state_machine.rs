//! Reauthentication state machine.
//!
//! Defines a pure state transition function for the reauthentication flow.
//! Side effects (gate evaluation, re-registration, event emission) live in
//! the application layer; the machine only decides what happens next.

use crate::session::ReauthRefusal;

/// Reauthentication flow state.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ReauthState {
    /// Consulting the retry gate.
    Checking,
    /// Re-registration in flight. Progress is synthetic and monotonic,
    /// for display pacing only.
    Reregistering { progress: u8 },
    /// Credentials verified; navigation home follows after a short display
    /// delay.
    Success,
    /// Flow failed or was refused. `can_retry` is false only once the
    /// attempt cap is exhausted.
    Error { error: ReauthError, can_retry: bool },
}

/// Events that drive the reauthentication flow.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ReauthEvent {
    /// The retry gate allowed an attempt.
    GateAllowed,
    /// The retry gate refused an attempt.
    GateRefused {
        refusal: ReauthRefusal,
        can_retry: bool,
    },
    /// Synthetic progress update while re-registering.
    ProgressTick { progress: u8 },
    /// Re-registration finished and credentials verified present.
    RegistrationVerified,
    /// Re-registration finished without usable credentials, or failed
    /// outright.
    RegistrationFailed {
        error: ReauthError,
        can_retry: bool,
    },
    /// The success screen has been displayed long enough.
    SuccessDisplayed,
    /// User asked to retry and the gate still allows it.
    RetryAllowed,
    /// User asked to retry but the gate refuses; the error message is
    /// rewritten without another attempt.
    RetryRefused {
        refusal: ReauthRefusal,
        can_retry: bool,
    },
    /// User asked for support.
    SupportRequested,
}

/// Side-effects produced by state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ReauthAction {
    /// Record the attempt in session bookkeeping before calling out.
    MarkAuthAttempt,
    /// Run the unconditional re-registration.
    BeginReregistration,
    /// Clear attempt bookkeeping after a verified success.
    ResetAuthAttempts,
    /// Leave the flow towards the home screen.
    NavigateHome,
    /// Leave the flow towards support.
    NavigateSupport,
}

/// Reauthentication error surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, serde::Serialize, serde::Deserialize)]
pub enum ReauthError {
    #[error("too many reauthentication attempts")]
    AttemptsExhausted,
    #[error("last reauthentication attempt was too recent")]
    Throttled,
    #[error("re-registration did not produce valid credentials")]
    RegistrationFailed,
    #[error("unexpected reauthentication failure: {0}")]
    Unexpected(String),
}

impl From<ReauthRefusal> for ReauthError {
    fn from(refusal: ReauthRefusal) -> Self {
        match refusal {
            ReauthRefusal::AttemptsExhausted => ReauthError::AttemptsExhausted,
            ReauthRefusal::Throttled => ReauthError::Throttled,
        }
    }
}

/// Pure reauthentication state machine.
pub struct ReauthStateMachine;

impl ReauthStateMachine {
    pub fn transition(state: ReauthState, event: ReauthEvent) -> (ReauthState, Vec<ReauthAction>) {
        match (state, event) {
            (ReauthState::Checking, ReauthEvent::GateAllowed) => (
                ReauthState::Reregistering { progress: 0 },
                vec![
                    ReauthAction::MarkAuthAttempt,
                    ReauthAction::BeginReregistration,
                ],
            ),
            (ReauthState::Checking, ReauthEvent::GateRefused { refusal, can_retry }) => (
                ReauthState::Error {
                    error: refusal.into(),
                    can_retry,
                },
                Vec::new(),
            ),
            (
                ReauthState::Reregistering { progress },
                ReauthEvent::ProgressTick { progress: next },
            ) => (
                ReauthState::Reregistering {
                    // progress never moves backwards
                    progress: progress.max(next),
                },
                Vec::new(),
            ),
            (ReauthState::Reregistering { .. }, ReauthEvent::RegistrationVerified) => {
                (ReauthState::Success, vec![ReauthAction::ResetAuthAttempts])
            }
            (
                ReauthState::Checking | ReauthState::Reregistering { .. },
                ReauthEvent::RegistrationFailed { error, can_retry },
            ) => (ReauthState::Error { error, can_retry }, Vec::new()),
            (ReauthState::Success, ReauthEvent::SuccessDisplayed) => {
                (ReauthState::Success, vec![ReauthAction::NavigateHome])
            }
            (ReauthState::Error { .. }, ReauthEvent::RetryAllowed) => {
                (ReauthState::Checking, Vec::new())
            }
            (ReauthState::Error { .. }, ReauthEvent::RetryRefused { refusal, can_retry }) => (
                ReauthState::Error {
                    error: refusal.into(),
                    can_retry,
                },
                Vec::new(),
            ),
            (state, ReauthEvent::SupportRequested) => {
                (state, vec![ReauthAction::NavigateSupport])
            }
            (state, _event) => (state, Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ReauthAction, ReauthError, ReauthEvent, ReauthState, ReauthStateMachine};
    use crate::session::ReauthRefusal;

    #[test]
    fn checking_gate_allowed_marks_attempt_and_begins_reregistration() {
        let (next, actions) =
            ReauthStateMachine::transition(ReauthState::Checking, ReauthEvent::GateAllowed);
        assert_eq!(next, ReauthState::Reregistering { progress: 0 });
        assert_eq!(
            actions,
            vec![
                ReauthAction::MarkAuthAttempt,
                ReauthAction::BeginReregistration
            ]
        );
    }

    #[test]
    fn checking_gate_refused_distinguishes_cap_from_cooldown() {
        let (next, actions) = ReauthStateMachine::transition(
            ReauthState::Checking,
            ReauthEvent::GateRefused {
                refusal: ReauthRefusal::AttemptsExhausted,
                can_retry: false,
            },
        );
        assert_eq!(
            next,
            ReauthState::Error {
                error: ReauthError::AttemptsExhausted,
                can_retry: false,
            }
        );
        assert!(actions.is_empty());

        let (next, _) = ReauthStateMachine::transition(
            ReauthState::Checking,
            ReauthEvent::GateRefused {
                refusal: ReauthRefusal::Throttled,
                can_retry: true,
            },
        );
        assert_eq!(
            next,
            ReauthState::Error {
                error: ReauthError::Throttled,
                can_retry: true,
            }
        );
    }

    #[test]
    fn progress_is_monotonic() {
        let (next, _) = ReauthStateMachine::transition(
            ReauthState::Reregistering { progress: 60 },
            ReauthEvent::ProgressTick { progress: 40 },
        );
        assert_eq!(next, ReauthState::Reregistering { progress: 60 });

        let (next, _) = ReauthStateMachine::transition(
            next,
            ReauthEvent::ProgressTick { progress: 80 },
        );
        assert_eq!(next, ReauthState::Reregistering { progress: 80 });
    }

    #[test]
    fn verified_registration_resets_attempts_and_succeeds() {
        let (next, actions) = ReauthStateMachine::transition(
            ReauthState::Reregistering { progress: 100 },
            ReauthEvent::RegistrationVerified,
        );
        assert_eq!(next, ReauthState::Success);
        assert_eq!(actions, vec![ReauthAction::ResetAuthAttempts]);
    }

    #[test]
    fn success_display_delay_navigates_home() {
        let (next, actions) =
            ReauthStateMachine::transition(ReauthState::Success, ReauthEvent::SuccessDisplayed);
        assert_eq!(next, ReauthState::Success);
        assert_eq!(actions, vec![ReauthAction::NavigateHome]);
    }

    #[test]
    fn refused_retry_rewrites_error_without_reattempting() {
        let state = ReauthState::Error {
            error: ReauthError::RegistrationFailed,
            can_retry: true,
        };
        let (next, actions) = ReauthStateMachine::transition(
            state,
            ReauthEvent::RetryRefused {
                refusal: ReauthRefusal::Throttled,
                can_retry: true,
            },
        );
        assert_eq!(
            next,
            ReauthState::Error {
                error: ReauthError::Throttled,
                can_retry: true,
            }
        );
        assert!(actions.is_empty());
    }

    #[test]
    fn support_request_emits_navigation_from_any_state() {
        let state = ReauthState::Error {
            error: ReauthError::AttemptsExhausted,
            can_retry: false,
        };
        let (next, actions) =
            ReauthStateMachine::transition(state.clone(), ReauthEvent::SupportRequested);
        assert_eq!(next, state);
        assert_eq!(actions, vec![ReauthAction::NavigateSupport]);
    }
}
