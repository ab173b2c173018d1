use crate::application::validation::ValidationErrors;

pub mod create_tag;
pub mod delete_tag;
pub mod list_tags;
pub mod reorder_tags;

pub const TAG_NAME_MAX_CHARS: usize = 255;

#[derive(thiserror::Error, Debug)]
pub enum TagError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("tag not found")]
    NotFound,
    #[error("tag repository failure")]
    Repository(#[source] anyhow::Error),
}
