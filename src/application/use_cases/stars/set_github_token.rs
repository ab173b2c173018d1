use uuid::Uuid;

use crate::application::ports::github_token_store::GithubTokenStore;

pub struct SetGithubToken<'a, S: GithubTokenStore + ?Sized> {
    pub store: &'a S,
}

impl<'a, S: GithubTokenStore + ?Sized> SetGithubToken<'a, S> {
    /// A blank token disconnects the owner's GitHub account.
    pub async fn execute(&self, owner_id: Uuid, token: &str) -> anyhow::Result<()> {
        let token = token.trim();
        if token.is_empty() {
            let removed = self.store.remove(owner_id).await?;
            tracing::info!(owner_id = %owner_id, removed, "github_token_cleared");
        } else {
            self.store.put(owner_id, token).await?;
            tracing::info!(owner_id = %owner_id, "github_token_stored");
        }
        Ok(())
    }
}
