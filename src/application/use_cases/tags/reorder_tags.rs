use std::collections::HashSet;

use uuid::Uuid;

use crate::application::dto::tags::ReorderItemDto;
use crate::application::ports::tag_repository::{ReorderOutcome, TagRepository};
use crate::application::use_cases::tags::TagError;
use crate::application::validation::ValidationErrors;
use crate::domain::tags::tag::{Tag, TagOrder};

pub struct ReorderTags<'a, R: TagRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TagRepository + ?Sized> ReorderTags<'a, R> {
    /// Only `sort_order` is written; a `name` in the payload is ignored.
    pub async fn execute(
        &self,
        owner_id: Uuid,
        items: &[ReorderItemDto],
    ) -> Result<Vec<Tag>, TagError> {
        let updates = check_items(items)?;

        match self
            .repo
            .apply_sort_orders(owner_id, &updates)
            .await
            .map_err(TagError::Repository)?
        {
            ReorderOutcome::Applied(tags) => {
                tracing::info!(owner_id = %owner_id, count = tags.len(), "tags_reordered");
                Ok(tags)
            }
            ReorderOutcome::Missing(missing) => {
                let mut errs = ValidationErrors::new();
                for (idx, item) in items.iter().enumerate() {
                    if item.id.is_some_and(|id| missing.contains(&id)) {
                        errs.add(format!("tags.{idx}.id"), "not found");
                    }
                }
                tracing::warn!(owner_id = %owner_id, ?missing, "reorder_rejected_unknown_ids");
                Err(errs.into())
            }
        }
    }
}

// Presence and duplicate checks run before anything touches the store.
fn check_items(items: &[ReorderItemDto]) -> Result<Vec<TagOrder>, ValidationErrors> {
    if items.is_empty() {
        return Err(ValidationErrors::single("tags", "required"));
    }

    let mut errs = ValidationErrors::new();
    let mut seen = HashSet::with_capacity(items.len());
    let mut updates = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        match item.id {
            None => errs.add(format!("tags.{idx}.id"), "required"),
            Some(id) if !seen.insert(id) => errs.add(format!("tags.{idx}.id"), "distinct"),
            Some(_) => {}
        }
        if item.sort_order.is_none() {
            errs.add(format!("tags.{idx}.sort_order"), "required");
        }
        if let (Some(id), Some(sort_order)) = (item.id, item.sort_order) {
            updates.push(TagOrder { id, sort_order });
        }
    }
    errs.into_result()?;
    Ok(updates)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    struct FakeRepo {
        owned: Vec<i64>,
        writes: Mutex<Vec<Vec<TagOrder>>>,
    }

    impl FakeRepo {
        fn owning(ids: &[i64]) -> Self {
            Self {
                owned: ids.to_vec(),
                writes: Mutex::new(Vec::new()),
            }
        }

        fn write_count(&self) -> usize {
            self.writes.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TagRepository for FakeRepo {
        async fn list_for_owner(&self, _owner_id: Uuid) -> anyhow::Result<Vec<Tag>> {
            unimplemented!()
        }

        async fn create(&self, _owner_id: Uuid, _name: &str) -> anyhow::Result<Tag> {
            unimplemented!()
        }

        async fn find_owned(&self, _id: i64, _owner_id: Uuid) -> anyhow::Result<Option<Tag>> {
            unimplemented!()
        }

        async fn delete_owned(&self, _id: i64, _owner_id: Uuid) -> anyhow::Result<bool> {
            unimplemented!()
        }

        async fn apply_sort_orders(
            &self,
            owner_id: Uuid,
            updates: &[TagOrder],
        ) -> anyhow::Result<ReorderOutcome> {
            let missing: Vec<i64> = updates
                .iter()
                .map(|u| u.id)
                .filter(|id| !self.owned.contains(id))
                .collect();
            if !missing.is_empty() {
                return Ok(ReorderOutcome::Missing(missing));
            }
            self.writes.lock().unwrap().push(updates.to_vec());
            let now = chrono::Utc::now();
            Ok(ReorderOutcome::Applied(
                updates
                    .iter()
                    .map(|u| Tag {
                        id: u.id,
                        owner_id,
                        name: format!("tag-{}", u.id),
                        sort_order: u.sort_order,
                        created_at: now,
                        updated_at: now,
                    })
                    .collect(),
            ))
        }
    }

    fn item(id: Option<i64>, sort_order: Option<i32>) -> ReorderItemDto {
        ReorderItemDto {
            id,
            name: Some("ignored".into()),
            sort_order,
        }
    }

    fn field_errors(err: TagError) -> ValidationErrors {
        match err {
            TagError::Validation(errs) => errs,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn applies_orders_in_request_order() {
        let repo = FakeRepo::owning(&[1, 2, 3]);
        let uc = ReorderTags { repo: &repo };
        let tags = uc
            .execute(
                Uuid::new_v4(),
                &[item(Some(3), Some(0)), item(Some(1), Some(1)), item(Some(2), Some(2))],
            )
            .await
            .unwrap();
        let got: Vec<(i64, i32)> = tags.iter().map(|t| (t.id, t.sort_order)).collect();
        assert_eq!(got, vec![(3, 0), (1, 1), (2, 2)]);
        assert_eq!(repo.write_count(), 1);
    }

    #[tokio::test]
    async fn one_missing_sort_order_rejects_the_whole_batch() {
        let repo = FakeRepo::owning(&[1, 2, 3]);
        let uc = ReorderTags { repo: &repo };
        let err = uc
            .execute(
                Uuid::new_v4(),
                &[item(Some(1), Some(0)), item(Some(2), None), item(Some(3), Some(2))],
            )
            .await
            .unwrap_err();
        let errs = field_errors(err);
        assert!(errs.contains("tags.1.sort_order"));
        assert_eq!(errs.errors().len(), 1);
        assert_eq!(repo.write_count(), 0);
    }

    #[tokio::test]
    async fn presence_is_checked_before_existence() {
        // 1337 is unknown, but the null id must be reported without a store round-trip.
        let repo = FakeRepo::owning(&[]);
        let uc = ReorderTags { repo: &repo };
        let err = uc
            .execute(Uuid::new_v4(), &[item(Some(1337), Some(0)), item(None, Some(1))])
            .await
            .unwrap_err();
        let errs = field_errors(err);
        assert!(errs.contains("tags.1.id"));
        assert!(!errs.contains("tags.0.id"));
    }

    #[tokio::test]
    async fn unknown_ids_are_reported_per_item() {
        let repo = FakeRepo::owning(&[1]);
        let uc = ReorderTags { repo: &repo };
        let err = uc
            .execute(Uuid::new_v4(), &[item(Some(1), Some(0)), item(Some(1337), Some(1))])
            .await
            .unwrap_err();
        let errs = field_errors(err);
        assert_eq!(errs.errors()["tags.1.id"], vec!["not found".to_string()]);
        assert!(!errs.contains("tags.0.id"));
        assert_eq!(repo.write_count(), 0);
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let repo = FakeRepo::owning(&[1]);
        let uc = ReorderTags { repo: &repo };
        let err = uc
            .execute(Uuid::new_v4(), &[item(Some(1), Some(0)), item(Some(1), Some(1))])
            .await
            .unwrap_err();
        assert_eq!(
            field_errors(err).errors()["tags.1.id"],
            vec!["distinct".to_string()]
        );
    }

    #[tokio::test]
    async fn empty_batch_is_invalid() {
        let repo = FakeRepo::owning(&[1]);
        let uc = ReorderTags { repo: &repo };
        let err = uc.execute(Uuid::new_v4(), &[]).await.unwrap_err();
        assert!(field_errors(err).contains("tags"));
    }
}
