use crate::config::AppConfig;
use crate::external::ApiClient;
use crate::session::SessionStore;
use crate::storage::Store;
use std::sync::Arc;

/// Shared handles passed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Store,
    pub sessions: SessionStore,
    pub api: ApiClient,
}

impl AppState {
    pub fn new(config: AppConfig, store: Store) -> Self {
        let api = ApiClient::new(&config);
        Self {
            config: Arc::new(config),
            store,
            sessions: SessionStore::new(),
            api,
        }
    }
}
