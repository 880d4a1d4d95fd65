//! Application state wiring

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::error::Result;
use crate::events::EventBus;
use crate::services::WatchlistView;
use crate::store::favorites::FAVORITES_FILE;
use crate::store::{CatalogCache, FavoritesStore, TokenStore};
use std::sync::Arc;
use tracing::info;

/// Process-wide shared state. The favorites store and catalog cache are the
/// only writers of their respective data; views go through their contracts
/// and re-read after a change notification.
pub struct AppState {
    pub config: AppConfig,
    pub api: Arc<ApiClient>,
    pub catalog: Arc<CatalogCache>,
    pub favorites: Arc<FavoritesStore>,
    pub tokens: Arc<TokenStore>,
    pub events: EventBus,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;
        info!(data_dir = %config.data_dir.display(), base_url = %config.base_url, "initializing");

        let tokens = Arc::new(TokenStore::new());
        let api = Arc::new(ApiClient::new(&config, tokens.clone())?);
        let events = EventBus::new();
        let favorites = Arc::new(FavoritesStore::new(
            config.data_dir.join(FAVORITES_FILE),
            events.clone(),
        ));
        let catalog = Arc::new(CatalogCache::new());

        Ok(Self {
            config,
            api,
            catalog,
            favorites,
            tokens,
            events,
        })
    }

    /// A fresh watchlist view model sharing this state's catalog cache and
    /// event bus. Each mounted watchlist/dashboard view gets its own.
    pub fn watchlist_view(&self) -> WatchlistView {
        WatchlistView::new(
            self.catalog.clone(),
            self.config.catalog_limit,
            self.events.clone(),
        )
    }
}
