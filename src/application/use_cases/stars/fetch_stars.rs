use uuid::Uuid;

use crate::application::ports::github_token_store::GithubTokenStore;
use crate::application::ports::stars_client::{RemoteApiError, StarsClientProvider};
use crate::application::validation::ValidationErrors;
use crate::domain::stars::star::StarsPage;

/// GitHub caps `first` on connections at 100.
pub const MAX_PER_PAGE: u32 = 100;

#[derive(thiserror::Error, Debug)]
pub enum FetchStarsError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("no GitHub access token is stored for this user")]
    MissingToken,
    #[error(transparent)]
    Remote(#[from] RemoteApiError),
    #[error("token store failure")]
    Repository(#[source] anyhow::Error),
}

pub struct FetchStars<'a, T, P>
where
    T: GithubTokenStore + ?Sized,
    P: StarsClientProvider + ?Sized,
{
    pub tokens: &'a T,
    pub clients: &'a P,
}

impl<'a, T, P> FetchStars<'a, T, P>
where
    T: GithubTokenStore + ?Sized,
    P: StarsClientProvider + ?Sized,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        cursor: Option<&str>,
        per_page: u32,
    ) -> Result<StarsPage, FetchStarsError> {
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(ValidationErrors::single(
                "per_page",
                format!("must be between 1 and {MAX_PER_PAGE}"),
            )
            .into());
        }
        let cursor = cursor.filter(|c| !c.is_empty());

        let token = self
            .tokens
            .get(user_id)
            .await
            .map_err(FetchStarsError::Repository)?
            .ok_or(FetchStarsError::MissingToken)?;

        let client = self.clients.for_token(&token);
        let page = client.fetch_stars(cursor, per_page).await.map_err(|e| {
            tracing::warn!(user_id = %user_id, error = %e, status = ?e.status(), "fetch_stars_failed");
            e
        })?;
        tracing::debug!(user_id = %user_id, edges = page.edges.len(), has_next = page.page_info.has_next_page, "stars_fetched");
        Ok(page)
    }
}
