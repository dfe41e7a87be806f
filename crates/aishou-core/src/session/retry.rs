//! Reauthentication retry gate.
//!
//! Pure decision logic: a flat attempt cap plus a cooldown window between
//! attempts protects the backend from retry storms.

use crate::session::UserSession;

/// Why a reauthentication attempt was refused.
///
/// The two reasons surface as different user-facing messages, so the gate
/// keeps them apart rather than collapsing both into a single boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ReauthRefusal {
    /// The hard attempt cap was reached. Only an explicit reset (after a
    /// verified successful reauthentication) clears this.
    AttemptsExhausted,
    /// The previous attempt is too recent.
    Throttled,
}

/// Retry limits for the reauthentication flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReauthPolicy {
    /// Flat cap on consecutive attempts.
    pub max_attempts: u32,
    /// Minimum elapsed time between attempts, in milliseconds.
    pub throttle_window_ms: i64,
}

impl Default for ReauthPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            throttle_window_ms: 60_000,
        }
    }
}

impl ReauthPolicy {
    /// Decide whether another reauthentication attempt may run now.
    ///
    /// The cap is checked before the cooldown: once exhausted, the refusal
    /// is `AttemptsExhausted` regardless of elapsed time.
    pub fn evaluate(&self, session: &UserSession, now_ms: i64) -> Result<(), ReauthRefusal> {
        if session.auth_attempt_count >= self.max_attempts {
            return Err(ReauthRefusal::AttemptsExhausted);
        }
        if let Some(last) = session.last_auth_attempt_timestamp {
            if now_ms.saturating_sub(last) < self.throttle_window_ms {
                return Err(ReauthRefusal::Throttled);
            }
        }
        Ok(())
    }

    /// Whether a manual retry can still succeed later, i.e. the cap has
    /// not been reached. Throttled attempts stay retryable.
    pub fn can_retry(&self, session: &UserSession) -> bool {
        session.auth_attempt_count < self.max_attempts
    }
}
