use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::stars::star::StarsPage;

#[derive(thiserror::Error, Debug)]
pub enum RemoteApiError {
    #[error("request to GitHub failed: {0}")]
    Transport(String),
    #[error("GitHub responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("GitHub returned errors: {0}")]
    GraphQl(String),
    #[error("unexpected GitHub response: {0}")]
    Decode(String),
}

impl RemoteApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[async_trait]
pub trait StarsClient: Send + Sync {
    /// Fetches up to `per_page` starred repositories following `cursor`.
    /// The cursor is handed to GitHub untouched; `None` starts at the top.
    async fn fetch_stars(
        &self,
        cursor: Option<&str>,
        per_page: u32,
    ) -> Result<StarsPage, RemoteApiError>;
}

/// Builds a [`StarsClient`] bound to one user's access token.
pub trait StarsClientProvider: Send + Sync {
    fn for_token(&self, access_token: &str) -> Arc<dyn StarsClient>;
}
