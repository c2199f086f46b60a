use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

use crate::modules::admin::application::ports::outgoing::AdminSessionStore;

/// Sessions kept in process memory; a restart logs every editor out.
///
/// Each token lives for `ttl` after it is issued. Expired tokens are dropped
/// whenever a new one is issued.
pub struct InMemoryAdminSessions {
    tokens: RwLock<HashMap<Uuid, Instant>>,
    ttl: Duration,
}

impl InMemoryAdminSessions {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(8 * 60 * 60);

    pub fn new() -> Self {
        Self::with_ttl(Self::DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            tokens: RwLock::new(HashMap::new()),
            ttl,
        }
    }
}

impl Default for InMemoryAdminSessions {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdminSessionStore for InMemoryAdminSessions {
    async fn issue(&self) -> Uuid {
        let token = Uuid::new_v4();
        let now = Instant::now();

        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, expires_at| *expires_at > now);
        let pruned = before - tokens.len();
        tokens.insert(token, now + self.ttl);

        debug!(session = %token, pruned, "Editor session issued");
        token
    }

    async fn is_active(&self, token: Uuid) -> bool {
        self.tokens
            .read()
            .await
            .get(&token)
            .is_some_and(|expires_at| *expires_at > Instant::now())
    }

    async fn revoke(&self, token: Uuid) -> bool {
        let removed = self
            .tokens
            .write()
            .await
            .remove(&token)
            .is_some_and(|expires_at| expires_at > Instant::now());
        debug!(session = %token, removed, "Editor session revoked");
        removed
    }
}
