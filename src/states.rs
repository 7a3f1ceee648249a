use crate::{
    auth::{IdentityProvider, JwtIdentityProvider},
    config::Config,
    rate_limit::{self, WriteLimiter},
    store::{MemoryPostStore, MemoryUserDirectory, PostStore, UserDirectory},
    uploads::UploadStore,
};
use std::sync::Arc;

/// Shared data across all requests.
///
/// Every collaborator is injected here once at startup; handlers never reach
/// for global state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostStore>,
    pub users: Arc<dyn UserDirectory>,
    pub identity: Arc<dyn IdentityProvider>,
    pub uploads: UploadStore,
    pub limiter: Arc<WriteLimiter>,
    pub config: Arc<Config>,
}

impl AppState {
    /// In-memory stores and JWT identities built from `config`.
    pub fn new(config: Config) -> Self {
        Self {
            posts: Arc::new(MemoryPostStore::new()),
            users: Arc::new(MemoryUserDirectory::new()),
            identity: Arc::new(JwtIdentityProvider::new(
                &config.jwt_secret,
                config.token_ttl_hours,
            )),
            uploads: UploadStore::new(config.upload_dir.clone()),
            limiter: Arc::new(rate_limit::build_limiter(&config.rate_limit)),
            config: Arc::new(config),
        }
    }
}
