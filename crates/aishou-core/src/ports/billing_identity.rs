use async_trait::async_trait;

/// External billing-identity provider (purchase SDK).
///
/// The bootstrap only consumes the id; SDK lifecycle is owned elsewhere.
#[async_trait]
pub trait BillingIdentityPort: Send + Sync {
    /// The externally assigned identity id, if the SDK has one yet.
    async fn app_user_id(&self) -> Option<String>;
}
