//! Session domain models
//!
//! This module defines the persisted user-session state that drives the
//! bootstrap flow: first-run detection, the locally minted user identity,
//! launch history, backend credentials and reauthentication bookkeeping.

mod retry;
mod status;

pub use retry::{ReauthPolicy, ReauthRefusal};
pub use status::AuthStatus;

/// Persisted user-session state.
///
/// Created with defaults on first access to the store, mutated by the
/// bootstrap orchestrator (first run), the registration service (token
/// fields) and the reauth flow (attempt bookkeeping). Never deleted except
/// through a full local reset.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UserSession {
    /// True until the first registration attempt has been marked.
    pub is_first_time_user: bool,
    /// Locally minted opaque identifier, reconciled with the billing
    /// identity during registration.
    pub user_id: Option<String>,
    /// Epoch milliseconds of the very first launch, set once.
    pub first_launch_timestamp: Option<i64>,
    /// Incremented on every non-first-time launch.
    pub app_launch_count: i64,
    pub auth_token: Option<String>,
    pub refresh_token: Option<String>,
    /// Epoch milliseconds of the last reauthentication attempt.
    pub last_auth_attempt_timestamp: Option<i64>,
    /// Grows between explicit resets; reset only after a verified
    /// successful reauthentication.
    pub auth_attempt_count: u32,
}

impl Default for UserSession {
    fn default() -> Self {
        Self {
            is_first_time_user: true,
            user_id: None,
            first_launch_timestamp: None,
            app_launch_count: 0,
            auth_token: None,
            refresh_token: None,
            last_auth_attempt_timestamp: None,
            auth_attempt_count: 0,
        }
    }
}

impl UserSession {
    /// Both credentials present and non-empty. Token validity is judged by
    /// the server; no expiry check happens client-side.
    pub fn has_valid_authentication(&self) -> bool {
        matches!(&self.auth_token, Some(t) if !t.is_empty())
            && matches!(&self.refresh_token, Some(r) if !r.is_empty())
    }

    /// Store both credentials. Tokens are only ever written as a pair.
    pub fn set_tokens(&mut self, auth_token: impl Into<String>, refresh_token: impl Into<String>) {
        self.auth_token = Some(auth_token.into());
        self.refresh_token = Some(refresh_token.into());
    }

    /// Drop both credentials, leaving identity and launch history intact.
    pub fn clear_tokens(&mut self) {
        self.auth_token = None;
        self.refresh_token = None;
    }
}

#[cfg(test)]
mod tests {
    use super::UserSession;

    #[test]
    fn default_session_is_first_time_without_identity() {
        let session = UserSession::default();
        assert!(session.is_first_time_user);
        assert!(session.user_id.is_none());
        assert_eq!(session.app_launch_count, 0);
        assert!(!session.has_valid_authentication());
    }

    #[test]
    fn tokens_are_written_and_cleared_as_a_pair() {
        let mut session = UserSession::default();
        session.set_tokens("t1", "r1");
        assert!(session.has_valid_authentication());

        session.clear_tokens();
        assert!(session.auth_token.is_none());
        assert!(session.refresh_token.is_none());
        assert!(!session.has_valid_authentication());
    }

    #[test]
    fn empty_token_strings_do_not_count_as_authenticated() {
        let mut session = UserSession::default();
        session.set_tokens("", "r1");
        assert!(!session.has_valid_authentication());
    }

    #[test]
    fn session_round_trips_through_json_with_missing_fields_defaulted() {
        let session: UserSession = serde_json::from_str("{}").unwrap();
        assert_eq!(session, UserSession::default());
    }
}
