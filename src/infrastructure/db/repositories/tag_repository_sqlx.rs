use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::tag_repository::{ReorderOutcome, TagRepository};
use crate::domain::tags::tag::{Tag, TagOrder};
use crate::infrastructure::db::PgPool;

pub struct SqlxTagRepository {
    pub pool: PgPool,
}

impl SqlxTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn tag_from_row(r: PgRow) -> Tag {
    Tag {
        id: r.get("id"),
        owner_id: r.get("owner_id"),
        name: r.get("name"),
        sort_order: r.get("sort_order"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

#[async_trait]
impl TagRepository for SqlxTagRepository {
    async fn list_for_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<Tag>> {
        let rows = sqlx::query(
            r#"SELECT id, owner_id, name, sort_order, created_at, updated_at
               FROM tags
               WHERE owner_id = $1
               ORDER BY sort_order ASC, id ASC"#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(tag_from_row).collect())
    }

    async fn create(&self, owner_id: Uuid, name: &str) -> anyhow::Result<Tag> {
        // Appending saturates at i32::MAX; reorder may have parked a tag there.
        let row = sqlx::query(
            r#"INSERT INTO tags (owner_id, name, sort_order)
               VALUES ($1, $2, (
                   SELECT COALESCE(LEAST(MAX(sort_order)::bigint + 1, 2147483647), 0)::int
                   FROM tags WHERE owner_id = $1
               ))
               RETURNING id, owner_id, name, sort_order, created_at, updated_at"#,
        )
        .bind(owner_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(tag_from_row(row))
    }

    async fn find_owned(&self, id: i64, owner_id: Uuid) -> anyhow::Result<Option<Tag>> {
        let row = sqlx::query(
            r#"SELECT id, owner_id, name, sort_order, created_at, updated_at
               FROM tags WHERE id = $1 AND owner_id = $2"#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(tag_from_row))
    }

    async fn delete_owned(&self, id: i64, owner_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM tags WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn apply_sort_orders(
        &self,
        owner_id: Uuid,
        updates: &[TagOrder],
    ) -> anyhow::Result<ReorderOutcome> {
        let ids: Vec<i64> = updates.iter().map(|u| u.id).collect();
        let mut tx = self.pool.begin().await?;

        // Lock in id order so concurrent batches for the same owner queue up
        // instead of deadlocking.
        let locked: HashSet<i64> = sqlx::query(
            r#"SELECT id FROM tags
               WHERE owner_id = $1 AND id = ANY($2)
               ORDER BY id
               FOR UPDATE"#,
        )
        .bind(owner_id)
        .bind(&ids)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .map(|r| r.get::<i64, _>("id"))
        .collect();

        let missing: Vec<i64> = ids
            .iter()
            .copied()
            .filter(|id| !locked.contains(id))
            .collect();
        if !missing.is_empty() {
            tx.rollback().await.ok();
            return Ok(ReorderOutcome::Missing(missing));
        }

        let mut tags = Vec::with_capacity(updates.len());
        for update in updates {
            let row = sqlx::query(
                r#"UPDATE tags SET sort_order = $1, updated_at = now()
                   WHERE id = $2 AND owner_id = $3
                   RETURNING id, owner_id, name, sort_order, created_at, updated_at"#,
            )
            .bind(update.sort_order)
            .bind(update.id)
            .bind(owner_id)
            .fetch_one(&mut *tx)
            .await?;
            tags.push(tag_from_row(row));
        }
        tx.commit().await?;
        Ok(ReorderOutcome::Applied(tags))
    }
}
