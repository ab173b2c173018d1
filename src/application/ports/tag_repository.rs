use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::tags::tag::{Tag, TagOrder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderOutcome {
    /// Every update was committed; tags are returned in batch order.
    Applied(Vec<Tag>),
    /// Ids that do not belong to the owner. Nothing was written.
    Missing(Vec<i64>),
}

#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn list_for_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<Tag>>;
    /// Inserts a tag at the end of the owner's ordering.
    async fn create(&self, owner_id: Uuid, name: &str) -> anyhow::Result<Tag>;
    async fn find_owned(&self, id: i64, owner_id: Uuid) -> anyhow::Result<Option<Tag>>;
    async fn delete_owned(&self, id: i64, owner_id: Uuid) -> anyhow::Result<bool>;
    /// Applies all sort orders atomically, or none of them when any id is
    /// not owned by `owner_id`.
    async fn apply_sort_orders(
        &self,
        owner_id: Uuid,
        updates: &[TagOrder],
    ) -> anyhow::Result<ReorderOutcome>;
}
