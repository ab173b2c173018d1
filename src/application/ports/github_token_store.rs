use async_trait::async_trait;
use uuid::Uuid;

/// Per-owner GitHub access tokens. Implementations keep them sealed at rest.
#[async_trait]
pub trait GithubTokenStore: Send + Sync {
    async fn put(&self, owner_id: Uuid, token: &str) -> anyhow::Result<()>;
    /// Returns false when nothing was stored.
    async fn remove(&self, owner_id: Uuid) -> anyhow::Result<bool>;
    async fn get(&self, owner_id: Uuid) -> anyhow::Result<Option<String>>;
}
