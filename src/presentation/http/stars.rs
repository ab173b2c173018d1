use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::use_cases::stars::fetch_stars::{FetchStars, MAX_PER_PAGE};
use crate::application::use_cases::stars::set_github_token::SetGithubToken;
use crate::bootstrap::app_context::AppContext;
use crate::domain::stars::star::{StarEdge, StarsPage};
use crate::presentation::http::auth::CurrentUser;
use crate::presentation::http::error::{ApiError, ErrorBody, JsonBody};

#[derive(Debug, Deserialize, ToSchema)]
pub struct GithubTokenRequest {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct StarsQuery {
    pub cursor: Option<String>,
    pub per_page: Option<u32>,
}

// Keeps GitHub's camelCase shape so clients can page with `pageInfo.endCursor`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StarsPageResponse {
    pub total_count: Option<i64>,
    pub edges: Vec<StarEdgeItem>,
    pub page_info: PageInfoItem,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StarEdgeItem {
    pub cursor: String,
    pub starred_at: chrono::DateTime<chrono::Utc>,
    pub node: StarredRepositoryItem,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageInfoItem {
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StarredRepositoryItem {
    pub id: String,
    pub database_id: Option<i64>,
    pub name: String,
    pub name_with_owner: String,
    pub description: Option<String>,
    pub url: String,
    pub homepage_url: Option<String>,
    pub stargazer_count: i64,
    pub fork_count: i64,
    pub primary_language: Option<LanguageItem>,
    pub owner: OwnerItem,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LanguageItem {
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerItem {
    pub login: String,
    pub avatar_url: Option<String>,
}

impl From<StarEdge> for StarEdgeItem {
    fn from(e: StarEdge) -> Self {
        let repo = e.node;
        StarEdgeItem {
            cursor: e.cursor,
            starred_at: e.starred_at,
            node: StarredRepositoryItem {
                id: repo.id,
                database_id: repo.database_id,
                name: repo.name,
                name_with_owner: repo.name_with_owner,
                description: repo.description,
                url: repo.url,
                homepage_url: repo.homepage_url,
                stargazer_count: repo.stargazer_count,
                fork_count: repo.fork_count,
                primary_language: repo.primary_language.map(|l| LanguageItem {
                    name: l.name,
                    color: l.color,
                }),
                owner: OwnerItem {
                    login: repo.owner.login,
                    avatar_url: repo.owner.avatar_url,
                },
            },
        }
    }
}

impl From<StarsPage> for StarsPageResponse {
    fn from(p: StarsPage) -> Self {
        StarsPageResponse {
            total_count: p.total_count,
            edges: p.edges.into_iter().map(Into::into).collect(),
            page_info: PageInfoItem {
                end_cursor: p.page_info.end_cursor,
                has_next_page: p.page_info.has_next_page,
            },
        }
    }
}

#[utoipa::path(get, path = "/api/stars", tag = "Stars",
    params(
        ("cursor" = Option<String>, Query, description = "Cursor of the last entry already seen"),
        ("per_page" = Option<u32>, Query, description = "Page size, 1-100 (default 100)")
    ),
    responses(
        (status = 200, body = StarsPageResponse),
        (status = 409, body = ErrorBody),
        (status = 422, body = ErrorBody),
        (status = 502, body = ErrorBody)
    ))]
pub async fn list_stars(
    State(ctx): State<AppContext>,
    CurrentUser(user_id): CurrentUser,
    Query(q): Query<StarsQuery>,
) -> Result<Json<StarsPageResponse>, ApiError> {
    let tokens = ctx.token_store();
    let clients = ctx.stars_clients();
    let uc = FetchStars {
        tokens: tokens.as_ref(),
        clients: clients.as_ref(),
    };
    let page = uc
        .execute(
            user_id,
            q.cursor.as_deref(),
            q.per_page.unwrap_or(MAX_PER_PAGE),
        )
        .await?;
    Ok(Json(page.into()))
}

#[utoipa::path(put, path = "/api/stars/token", tag = "Stars", request_body = GithubTokenRequest,
    responses((status = 204), (status = 422, body = ErrorBody)))]
pub async fn set_github_token(
    State(ctx): State<AppContext>,
    CurrentUser(user_id): CurrentUser,
    JsonBody(req): JsonBody<GithubTokenRequest>,
) -> Result<StatusCode, ApiError> {
    let store = ctx.token_store();
    let uc = SetGithubToken {
        store: store.as_ref(),
    };
    uc.execute(user_id, &req.token).await.map_err(|e| {
        tracing::error!(error = ?e, "github_token_update_failed");
        ApiError::internal()
    })?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/stars", get(list_stars))
        .route("/stars/token", put(set_github_token))
        .with_state(ctx)
}
