use uuid::Uuid;

use crate::application::ports::tag_repository::TagRepository;
use crate::application::use_cases::tags::TagError;

pub struct DeleteTag<'a, R: TagRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TagRepository + ?Sized> DeleteTag<'a, R> {
    /// Tags owned by someone else are reported exactly like missing ones.
    pub async fn execute(&self, owner_id: Uuid, id: i64) -> Result<(), TagError> {
        let tag = self
            .repo
            .find_owned(id, owner_id)
            .await
            .map_err(TagError::Repository)?
            .ok_or(TagError::NotFound)?;

        let deleted = self
            .repo
            .delete_owned(tag.id, owner_id)
            .await
            .map_err(TagError::Repository)?;
        if !deleted {
            return Err(TagError::NotFound);
        }
        tracing::info!(owner_id = %owner_id, tag_id = id, name = %tag.name, "tag_deleted");
        Ok(())
    }
}
