use uuid::Uuid;

use crate::application::ports::tag_repository::TagRepository;
use crate::application::use_cases::tags::{TAG_NAME_MAX_CHARS, TagError};
use crate::application::validation::{ValidationErrors, required_text};
use crate::domain::tags::tag::Tag;

pub struct CreateTag<'a, R: TagRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TagRepository + ?Sized> CreateTag<'a, R> {
    pub async fn execute(&self, owner_id: Uuid, name: Option<&str>) -> Result<Tag, TagError> {
        let mut errs = ValidationErrors::new();
        let Some(name) = required_text(&mut errs, "name", name, TAG_NAME_MAX_CHARS) else {
            return Err(errs.into());
        };

        let tag = self
            .repo
            .create(owner_id, &name)
            .await
            .map_err(TagError::Repository)?;
        tracing::info!(owner_id = %owner_id, tag_id = tag.id, sort_order = tag.sort_order, "tag_created");
        Ok(tag)
    }
}
