use async_trait::async_trait;
use uuid::Uuid;

/// Registry of editor sessions handed out over HTTP.
#[async_trait]
pub trait AdminSessionStore: Send + Sync {
    async fn issue(&self) -> Uuid;

    async fn is_active(&self, token: Uuid) -> bool;

    /// Returns whether the token was active.
    async fn revoke(&self, token: Uuid) -> bool;
}
