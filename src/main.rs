use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use astral::application::ports::github_token_store::GithubTokenStore;
use astral::application::ports::stars_client::StarsClientProvider;
use astral::application::ports::tag_repository::TagRepository;
use astral::bootstrap::app_context::{AppContext, AppServices};
use astral::bootstrap::config::Config;
use astral::infrastructure::db::repositories::github_token_store_sqlx::SqlxGithubTokenStore;
use astral::infrastructure::db::repositories::tag_repository_sqlx::SqlxTagRepository;
use astral::infrastructure::github::ReqwestStarsClientProvider;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            astral::presentation::http::tags::list_tags,
            astral::presentation::http::tags::create_tag,
            astral::presentation::http::tags::reorder_tags,
            astral::presentation::http::tags::delete_tag,
            astral::presentation::http::stars::list_stars,
            astral::presentation::http::stars::set_github_token,
            astral::presentation::http::health::health,
        ),
        components(schemas(
            astral::presentation::http::tags::TagItem,
            astral::presentation::http::tags::CreateTagRequest,
            astral::presentation::http::tags::ReorderTagItem,
            astral::presentation::http::tags::ReorderTagsRequest,
            astral::presentation::http::stars::StarsPageResponse,
            astral::presentation::http::stars::StarEdgeItem,
            astral::presentation::http::stars::PageInfoItem,
            astral::presentation::http::stars::StarredRepositoryItem,
            astral::presentation::http::stars::LanguageItem,
            astral::presentation::http::stars::OwnerItem,
            astral::presentation::http::stars::GithubTokenRequest,
            astral::presentation::http::error::ErrorBody,
            astral::presentation::http::health::HealthStatus,
        )),
        tags(
            (name = "Tags", description = "User tags and their ordering"),
            (name = "Stars", description = "Starred GitHub repositories"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

fn cors_layer(cfg: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::PUT,
            http::Method::DELETE,
            http::Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION]);
    // Bearer tokens only, so no credentialed CORS.
    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(origin),
        Some(Err(_)) | None if cfg.is_production => {
            tracing::warn!("FRONTEND_URL is not a valid origin; cross-origin requests are refused");
            base
        }
        _ => base.allow_origin(AllowOrigin::any()),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "failed to listen for shutdown signal");
    }
    info!("shutdown_requested");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "astral=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(
        api_port = cfg.api_port,
        github = %cfg.github_graphql_url,
        production = cfg.is_production,
        "Starting Astral backend"
    );

    // Database
    let pool =
        astral::infrastructure::db::connect_pool(&cfg.database_url, cfg.database_max_connections)
            .await?;
    astral::infrastructure::db::migrate(&pool).await?;

    let tag_repo: Arc<dyn TagRepository> = Arc::new(SqlxTagRepository::new(pool.clone()));
    let token_store: Arc<dyn GithubTokenStore> = Arc::new(SqlxGithubTokenStore::new(
        pool.clone(),
        cfg.encryption_key.clone(),
    ));
    let stars_clients: Arc<dyn StarsClientProvider> = Arc::new(ReqwestStarsClientProvider::new(
        cfg.github_graphql_url.clone(),
        Duration::from_secs(cfg.github_timeout_secs),
    )?);

    let services = AppServices::new(tag_repo, token_store, stars_clients);
    let ctx = AppContext::new(cfg.clone(), services);

    let app = Router::new()
        .nest("/api", astral::presentation::http::health::routes(pool.clone()))
        .merge(astral::presentation::http::api_routes(ctx))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(&cfg))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
