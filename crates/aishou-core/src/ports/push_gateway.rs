use async_trait::async_trait;

/// Push-notification SDK collaborator.
///
/// Invoked best-effort after registration so the device can be associated
/// with a backend user; never awaited critically and never allowed to
/// block app readiness.
#[async_trait]
pub trait PushGatewayPort: Send + Sync {
    async fn initialize(&self) -> anyhow::Result<()>;

    /// Reconcile the push subscriber id with the backend user.
    async fn sync_subscriber_id(&self) -> anyhow::Result<()>;
}
