pub mod stars_client_reqwest;

pub use stars_client_reqwest::{
    DEFAULT_TIMEOUT, GITHUB_GRAPHQL_URL, GitHubClient, ReqwestStarsClientProvider,
};
