use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::github_token_store::GithubTokenStore;
use crate::infrastructure::crypto;
use crate::infrastructure::db::PgPool;

pub struct SqlxGithubTokenStore {
    pub pool: PgPool,
    encryption_key: String,
}

impl SqlxGithubTokenStore {
    pub fn new(pool: PgPool, encryption_key: impl Into<String>) -> Self {
        Self {
            pool,
            encryption_key: encryption_key.into(),
        }
    }
}

#[async_trait]
impl GithubTokenStore for SqlxGithubTokenStore {
    async fn put(&self, owner_id: Uuid, token: &str) -> anyhow::Result<()> {
        let sealed = crypto::encrypt_string(&self.encryption_key, token)?;
        // Upsert so two writers for one owner never race into a key violation.
        sqlx::query(
            r#"INSERT INTO github_credentials (owner_id, sealed_token)
               VALUES ($1, $2)
               ON CONFLICT (owner_id)
               DO UPDATE SET sealed_token = EXCLUDED.sealed_token, updated_at = now()"#,
        )
        .bind(owner_id)
        .bind(sealed)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove(&self, owner_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM github_credentials WHERE owner_id = $1")
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn get(&self, owner_id: Uuid) -> anyhow::Result<Option<String>> {
        let sealed: Option<String> =
            sqlx::query_scalar("SELECT sealed_token FROM github_credentials WHERE owner_id = $1")
                .bind(owner_id)
                .fetch_optional(&self.pool)
                .await?;
        sealed
            .map(|s| crypto::decrypt_string(&self.encryption_key, &s))
            .transpose()
    }
}
