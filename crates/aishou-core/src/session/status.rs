/// Authentication status derived at bootstrap time.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AuthStatus {
    /// Both credentials are present; the server will judge their validity.
    Authenticated,
    /// Credentials are missing and the reauth gate currently allows a retry.
    NeedsReauth,
    /// Credentials are missing and the reauth gate refuses (cap or cooldown).
    ReauthBlocked,
    /// The status could not be derived (storage failure).
    Error(String),
}
