pub mod github_token_store;
pub mod stars_client;
pub mod tag_repository;
