use uuid::Uuid;

use crate::application::ports::tag_repository::TagRepository;
use crate::application::use_cases::tags::TagError;
use crate::domain::tags::tag::Tag;

pub struct ListTags<'a, R: TagRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TagRepository + ?Sized> ListTags<'a, R> {
    pub async fn execute(&self, owner_id: Uuid) -> Result<Vec<Tag>, TagError> {
        self.repo
            .list_for_owner(owner_id)
            .await
            .map_err(TagError::Repository)
    }
}
