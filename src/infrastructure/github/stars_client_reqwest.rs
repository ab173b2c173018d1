use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::stars_client::{RemoteApiError, StarsClient, StarsClientProvider};
use crate::domain::stars::star::StarsPage;

pub const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("astral/", env!("CARGO_PKG_VERSION"));

const STARS_QUERY: &str = r#"
query StarredRepositories($after: String, $first: Int!) {
  viewer {
    starredRepositories(first: $first, after: $after, orderBy: {field: STARRED_AT, direction: DESC}) {
      totalCount
      edges {
        cursor
        starredAt
        node {
          id
          databaseId
          name
          nameWithOwner
          description
          url
          homepageUrl
          stargazerCount
          forkCount
          primaryLanguage { name color }
          owner { login avatarUrl }
        }
      }
      pageInfo { endCursor hasNextPage }
    }
  }
}
"#;

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'static str,
    variables: StarsVariables<'a>,
}

#[derive(Serialize)]
struct StarsVariables<'a> {
    after: Option<&'a str>,
    first: u32,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<ViewerData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct ViewerData {
    viewer: Viewer,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Viewer {
    starred_repositories: StarsPage,
}

fn build_http_client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build http client: {e}"))
}

/// GraphQL client for one GitHub access token.
pub struct GitHubClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl GitHubClient {
    pub fn with_endpoint(
        token: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            client: build_http_client(timeout)?,
            endpoint: endpoint.into(),
            token: token.into(),
        })
    }
}

#[async_trait]
impl StarsClient for GitHubClient {
    async fn fetch_stars(
        &self,
        cursor: Option<&str>,
        per_page: u32,
    ) -> Result<StarsPage, RemoteApiError> {
        let body = GraphQlRequest {
            query: STARS_QUERY,
            variables: StarsVariables {
                after: cursor,
                first: per_page,
            },
        };
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| RemoteApiError::Transport(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| RemoteApiError::Transport(format!("failed to read body: {e}")))?;
        if !status.is_success() {
            return Err(RemoteApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let decoded: GraphQlResponse =
            serde_json::from_str(&text).map_err(|e| RemoteApiError::Decode(e.to_string()))?;
        if !decoded.errors.is_empty() {
            let messages: Vec<String> = decoded.errors.into_iter().map(|e| e.message).collect();
            return Err(RemoteApiError::GraphQl(messages.join("; ")));
        }
        decoded
            .data
            .map(|d| d.viewer.starred_repositories)
            .ok_or_else(|| RemoteApiError::Decode("response carried no data".into()))
    }
}

/// Hands out per-token clients that share one connection pool.
pub struct ReqwestStarsClientProvider {
    client: reqwest::Client,
    endpoint: String,
}

impl ReqwestStarsClientProvider {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: build_http_client(timeout)?,
            endpoint: endpoint.into(),
        })
    }
}

impl StarsClientProvider for ReqwestStarsClientProvider {
    fn for_token(&self, access_token: &str) -> Arc<dyn StarsClient> {
        Arc::new(GitHubClient {
            client: self.client.clone(),
            endpoint: self.endpoint.clone(),
            token: access_token.to_string(),
        })
    }
}
