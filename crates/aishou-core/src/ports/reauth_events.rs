use crate::reauth::ReauthState;

/// Navigation requests emitted by the reauth flow and consumed by the
/// router collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum NavigationEvent {
    Home,
    Support,
}

#[async_trait::async_trait]
pub trait ReauthEventPort: Send + Sync {
    async fn state_changed(&self, state: ReauthState);

    async fn navigate(&self, event: NavigationEvent);
}
