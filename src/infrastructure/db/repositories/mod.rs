pub mod github_token_store_sqlx;
pub mod tag_repository_sqlx;
