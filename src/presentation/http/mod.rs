use axum::Router;

use crate::bootstrap::app_context::AppContext;

pub mod auth;
pub mod error;
pub mod health;
pub mod stars;
pub mod tags;

/// Every authenticated JSON route, mounted under `/api`.
pub fn api_routes(ctx: AppContext) -> Router {
    Router::new()
        .nest("/api", tags::routes(ctx.clone()))
        .nest("/api", stars::routes(ctx))
}
