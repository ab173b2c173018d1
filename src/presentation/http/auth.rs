use axum::extract::FromRequestParts;
use axum::http::{StatusCode, header::AUTHORIZATION, request::Parts};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::presentation::http::error::ApiError;

// Accounts and sessions belong to the identity provider; this service only
// trusts HS256 tokens signed with the shared `JWT_SECRET`.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    exp: i64,
}

/// Owner id taken from a valid `Authorization: Bearer` token.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Uuid);

#[axum::async_trait]
impl FromRequestParts<AppContext> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(StatusCode::UNAUTHORIZED)?;
        let owner_id = owner_from_token(&ctx.cfg, token).map_err(|e| {
            tracing::debug!(error = %e, "bearer_rejected");
            StatusCode::UNAUTHORIZED
        })?;
        Ok(CurrentUser(owner_id))
    }
}

fn owner_from_token(cfg: &Config, token: &str) -> jsonwebtoken::errors::Result<Uuid> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims.sub)
}

/// Signs a token for `owner_id` valid for `JWT_EXPIRES_SECS`, the same shape
/// the identity provider hands out.
pub fn issue_token(cfg: &Config, owner_id: Uuid) -> anyhow::Result<String> {
    let claims = Claims {
        sub: owner_id,
        exp: chrono::Utc::now().timestamp() + cfg.jwt_expires_secs,
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
    )?;
    Ok(token)
}
