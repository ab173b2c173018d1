#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use astral::application::ports::github_token_store::GithubTokenStore;
use astral::application::ports::stars_client::{
    RemoteApiError, StarsClient, StarsClientProvider,
};
use astral::application::ports::tag_repository::{ReorderOutcome, TagRepository};
use astral::bootstrap::app_context::{AppContext, AppServices};
use astral::bootstrap::config::Config;
use astral::domain::stars::star::StarsPage;
use astral::domain::tags::tag::{Tag, TagOrder};
use astral::presentation::http::auth::issue_token;

pub fn test_config() -> Config {
    Config {
        api_port: 0,
        frontend_url: None,
        database_url: "postgres://unused".into(),
        database_max_connections: 1,
        jwt_secret: "test-secret-test-secret".into(),
        jwt_expires_secs: 3600,
        encryption_key: "test-encryption-key".into(),
        github_graphql_url: "http://127.0.0.1:1/graphql".into(),
        github_timeout_secs: 1,
        is_production: false,
    }
}

#[derive(Default)]
struct TagState {
    next_id: i64,
    tags: Vec<Tag>,
}

/// Mutex-guarded store; holding the lock for a whole batch gives the same
/// all-or-nothing behaviour as the Postgres transaction.
#[derive(Default)]
pub struct InMemoryTagRepository {
    state: Mutex<TagState>,
}

impl InMemoryTagRepository {
    pub fn seed(&self, owner_id: Uuid, name: &str) -> Tag {
        let mut st = self.state.lock().unwrap();
        insert(&mut st, owner_id, name)
    }

    pub fn owned_by(&self, owner_id: Uuid) -> Vec<Tag> {
        let st = self.state.lock().unwrap();
        let mut tags: Vec<Tag> = st
            .tags
            .iter()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect();
        tags.sort_by_key(|t| (t.sort_order, t.id));
        tags
    }

    pub fn get(&self, id: i64) -> Option<Tag> {
        let st = self.state.lock().unwrap();
        st.tags.iter().find(|t| t.id == id).cloned()
    }
}

fn insert(st: &mut TagState, owner_id: Uuid, name: &str) -> Tag {
    st.next_id += 1;
    let sort_order = st
        .tags
        .iter()
        .filter(|t| t.owner_id == owner_id)
        .map(|t| t.sort_order.saturating_add(1))
        .max()
        .unwrap_or(0);
    let now = chrono::Utc::now();
    let tag = Tag {
        id: st.next_id,
        owner_id,
        name: name.to_string(),
        sort_order,
        created_at: now,
        updated_at: now,
    };
    st.tags.push(tag.clone());
    tag
}

#[async_trait]
impl TagRepository for InMemoryTagRepository {
    async fn list_for_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<Tag>> {
        Ok(self.owned_by(owner_id))
    }

    async fn create(&self, owner_id: Uuid, name: &str) -> anyhow::Result<Tag> {
        let mut st = self.state.lock().unwrap();
        Ok(insert(&mut st, owner_id, name))
    }

    async fn find_owned(&self, id: i64, owner_id: Uuid) -> anyhow::Result<Option<Tag>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .tags
            .iter()
            .find(|t| t.id == id && t.owner_id == owner_id)
            .cloned())
    }

    async fn delete_owned(&self, id: i64, owner_id: Uuid) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        let before = st.tags.len();
        st.tags.retain(|t| !(t.id == id && t.owner_id == owner_id));
        Ok(st.tags.len() < before)
    }

    async fn apply_sort_orders(
        &self,
        owner_id: Uuid,
        updates: &[TagOrder],
    ) -> anyhow::Result<ReorderOutcome> {
        let mut st = self.state.lock().unwrap();
        let missing: Vec<i64> = updates
            .iter()
            .map(|u| u.id)
            .filter(|id| !st.tags.iter().any(|t| t.id == *id && t.owner_id == owner_id))
            .collect();
        if !missing.is_empty() {
            return Ok(ReorderOutcome::Missing(missing));
        }
        let now = chrono::Utc::now();
        let mut out = Vec::with_capacity(updates.len());
        for u in updates {
            if let Some(tag) = st.tags.iter_mut().find(|t| t.id == u.id) {
                tag.sort_order = u.sort_order;
                tag.updated_at = now;
                out.push(tag.clone());
            }
        }
        Ok(ReorderOutcome::Applied(out))
    }
}

#[derive(Default)]
pub struct InMemoryTokenStore {
    tokens: Mutex<HashMap<Uuid, String>>,
}

impl InMemoryTokenStore {
    pub fn stored(&self, owner_id: Uuid) -> Option<String> {
        self.tokens.lock().unwrap().get(&owner_id).cloned()
    }
}

#[async_trait]
impl GithubTokenStore for InMemoryTokenStore {
    async fn put(&self, owner_id: Uuid, token: &str) -> anyhow::Result<()> {
        self.tokens
            .lock()
            .unwrap()
            .insert(owner_id, token.to_string());
        Ok(())
    }

    async fn remove(&self, owner_id: Uuid) -> anyhow::Result<bool> {
        Ok(self.tokens.lock().unwrap().remove(&owner_id).is_some())
    }

    async fn get(&self, owner_id: Uuid) -> anyhow::Result<Option<String>> {
        Ok(self.stored(owner_id))
    }
}

#[derive(Clone)]
pub enum StubReply {
    Page(StarsPage),
    Status(u16, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarsCall {
    pub token: String,
    pub cursor: Option<String>,
    pub per_page: u32,
}

pub struct StubStarsProvider {
    reply: StubReply,
    calls: Arc<Mutex<Vec<StarsCall>>>,
}

impl StubStarsProvider {
    pub fn new(reply: StubReply) -> Self {
        Self {
            reply,
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<StarsCall> {
        self.calls.lock().unwrap().clone()
    }
}

struct StubStarsClient {
    token: String,
    reply: StubReply,
    calls: Arc<Mutex<Vec<StarsCall>>>,
}

#[async_trait]
impl StarsClient for StubStarsClient {
    async fn fetch_stars(
        &self,
        cursor: Option<&str>,
        per_page: u32,
    ) -> Result<StarsPage, RemoteApiError> {
        self.calls.lock().unwrap().push(StarsCall {
            token: self.token.clone(),
            cursor: cursor.map(str::to_string),
            per_page,
        });
        match &self.reply {
            StubReply::Page(page) => Ok(page.clone()),
            StubReply::Status(status, body) => Err(RemoteApiError::Status {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}

impl StarsClientProvider for StubStarsProvider {
    fn for_token(&self, access_token: &str) -> Arc<dyn StarsClient> {
        Arc::new(StubStarsClient {
            token: access_token.to_string(),
            reply: self.reply.clone(),
            calls: self.calls.clone(),
        })
    }
}

pub struct TestApp {
    pub cfg: Config,
    pub tags: Arc<InMemoryTagRepository>,
    pub tokens: Arc<InMemoryTokenStore>,
    pub stars: Arc<StubStarsProvider>,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_stars(StubReply::Status(500, "stars not configured".into()))
    }

    pub fn with_stars(reply: StubReply) -> Self {
        let cfg = test_config();
        let tags = Arc::new(InMemoryTagRepository::default());
        let tokens = Arc::new(InMemoryTokenStore::default());
        let stars = Arc::new(StubStarsProvider::new(reply));
        let services = AppServices::new(tags.clone(), tokens.clone(), stars.clone());
        let ctx = AppContext::new(cfg.clone(), services);
        let router = astral::presentation::http::api_routes(ctx);
        Self {
            cfg,
            tags,
            tokens,
            stars,
            router,
        }
    }

    /// A fresh owner, optionally with a connected GitHub account.
    pub fn owner(&self, github_token: Option<&str>) -> Uuid {
        let owner_id = Uuid::new_v4();
        if let Some(token) = github_token {
            self.tokens
                .tokens
                .lock()
                .unwrap()
                .insert(owner_id, token.to_string());
        }
        owner_id
    }

    pub fn token_for(&self, user_id: Uuid) -> String {
        issue_token(&self.cfg, user_id).unwrap()
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(t) = token {
            req = req.header("authorization", format!("Bearer {t}"));
        }
        let req = match body {
            Some(json) => req
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => req.body(Body::empty()).unwrap(),
        };
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::String(
                String::from_utf8_lossy(&bytes).into_owned(),
            ))
        };
        (status, value)
    }
}
