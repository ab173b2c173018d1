use std::sync::Arc;

use crate::application::ports::github_token_store::GithubTokenStore;
use crate::application::ports::stars_client::StarsClientProvider;
use crate::application::ports::tag_repository::TagRepository;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    tag_repo: Arc<dyn TagRepository>,
    token_store: Arc<dyn GithubTokenStore>,
    stars_clients: Arc<dyn StarsClientProvider>,
}

impl AppServices {
    pub fn new(
        tag_repo: Arc<dyn TagRepository>,
        token_store: Arc<dyn GithubTokenStore>,
        stars_clients: Arc<dyn StarsClientProvider>,
    ) -> Self {
        Self {
            tag_repo,
            token_store,
            stars_clients,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn tag_repo(&self) -> Arc<dyn TagRepository> {
        self.services.tag_repo.clone()
    }

    pub fn token_store(&self) -> Arc<dyn GithubTokenStore> {
        self.services.token_store.clone()
    }

    pub fn stars_clients(&self) -> Arc<dyn StarsClientProvider> {
        self.services.stars_clients.clone()
    }
}
