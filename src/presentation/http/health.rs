use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::infrastructure::db::PgPool;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    /// `ok`, or `degraded` while Postgres is unreachable.
    pub status: &'static str,
    pub database: bool,
    pub version: &'static str,
}

#[utoipa::path(get, path = "/api/health", tag = "Health",
    responses((status = 200, body = HealthStatus)))]
pub async fn health(State(pool): State<PgPool>) -> Json<HealthStatus> {
    let database = match sqlx::query("SELECT 1").execute(&pool).await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "database_ping_failed");
            false
        }
    };
    Json(HealthStatus {
        status: if database { "ok" } else { "degraded" },
        database,
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn routes(pool: PgPool) -> Router {
    Router::new().route("/health", get(health)).with_state(pool)
}
