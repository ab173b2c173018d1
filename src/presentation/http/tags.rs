use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, put},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::dto::tags::ReorderItemDto;
use crate::application::use_cases::tags::create_tag::CreateTag;
use crate::application::use_cases::tags::delete_tag::DeleteTag;
use crate::application::use_cases::tags::list_tags::ListTags;
use crate::application::use_cases::tags::reorder_tags::ReorderTags;
use crate::bootstrap::app_context::AppContext;
use crate::domain::tags::tag::Tag;
use crate::presentation::http::auth::CurrentUser;
use crate::presentation::http::error::{ApiError, ErrorBody, JsonBody};

#[derive(Debug, Serialize, ToSchema)]
pub struct TagItem {
    pub id: i64,
    pub name: String,
    pub sort_order: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Tag> for TagItem {
    fn from(t: Tag) -> Self {
        TagItem {
            id: t.id,
            name: t.name,
            sort_order: t.sort_order,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTagRequest {
    pub name: Option<String>,
}

// Nulls are accepted here so the use case can report them as field errors.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReorderTagItem {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReorderTagsRequest {
    #[serde(default)]
    pub tags: Option<Vec<ReorderTagItem>>,
}

impl From<ReorderTagItem> for ReorderItemDto {
    fn from(i: ReorderTagItem) -> Self {
        ReorderItemDto {
            id: i.id,
            name: i.name,
            sort_order: i.sort_order,
        }
    }
}

#[utoipa::path(get, path = "/api/tags", tag = "Tags",
    responses((status = 200, body = [TagItem])))]
pub async fn list_tags(
    State(ctx): State<AppContext>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<TagItem>>, ApiError> {
    let repo = ctx.tag_repo();
    let uc = ListTags {
        repo: repo.as_ref(),
    };
    let tags = uc.execute(user_id).await?;
    Ok(Json(tags.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/api/tags", tag = "Tags", request_body = CreateTagRequest,
    responses((status = 200, body = TagItem), (status = 422, body = ErrorBody)))]
pub async fn create_tag(
    State(ctx): State<AppContext>,
    CurrentUser(user_id): CurrentUser,
    JsonBody(req): JsonBody<CreateTagRequest>,
) -> Result<Json<TagItem>, ApiError> {
    let repo = ctx.tag_repo();
    let uc = CreateTag {
        repo: repo.as_ref(),
    };
    let tag = uc.execute(user_id, req.name.as_deref()).await?;
    Ok(Json(tag.into()))
}

#[utoipa::path(put, path = "/api/tags/reorder", tag = "Tags", request_body = ReorderTagsRequest,
    responses((status = 200, body = [TagItem]), (status = 422, body = ErrorBody)))]
pub async fn reorder_tags(
    State(ctx): State<AppContext>,
    CurrentUser(user_id): CurrentUser,
    JsonBody(req): JsonBody<ReorderTagsRequest>,
) -> Result<Json<Vec<TagItem>>, ApiError> {
    let items: Vec<ReorderItemDto> = req
        .tags
        .unwrap_or_default()
        .into_iter()
        .map(Into::into)
        .collect();
    let repo = ctx.tag_repo();
    let uc = ReorderTags {
        repo: repo.as_ref(),
    };
    let tags = uc.execute(user_id, &items).await?;
    Ok(Json(tags.into_iter().map(Into::into).collect()))
}

#[utoipa::path(delete, path = "/api/tags/{id}", tag = "Tags",
    params(("id" = i64, Path, description = "Tag ID")),
    responses((status = 204), (status = 404, body = ErrorBody)))]
pub async fn delete_tag(
    State(ctx): State<AppContext>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let repo = ctx.tag_repo();
    let uc = DeleteTag {
        repo: repo.as_ref(),
    };
    uc.execute(user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/tags", get(list_tags).post(create_tag))
        .route("/tags/reorder", put(reorder_tags))
        .route("/tags/:id", delete(delete_tag))
        .with_state(ctx)
}
