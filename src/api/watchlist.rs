//! Watchlist endpoints

use super::ApiClient;
use crate::error::Result;
use crate::models::WatchlistItem;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
struct AddWatchlistRequest<'a> {
    symbol: &'a str,
    exchange: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct SetWhatsappRequest {
    notify_whatsapp: bool,
}

impl ApiClient {
    /// `GET /watchlist`
    pub async fn watchlist(&self) -> Result<Vec<WatchlistItem>> {
        self.get_json("/watchlist", &[]).await
    }

    /// `POST /watchlist` with `{ symbol, exchange? }`. A 409 from the backend
    /// surfaces as [`crate::error::AppError::Conflict`].
    pub async fn watchlist_add(
        &self,
        symbol: &str,
        exchange: Option<&str>,
    ) -> Result<WatchlistItem> {
        info!(symbol, ?exchange, "adding to watchlist");
        self.post_json("/watchlist", &AddWatchlistRequest { symbol, exchange })
            .await
    }

    /// `DELETE /watchlist/{id}`
    pub async fn watchlist_remove(&self, id: i64) -> Result<()> {
        info!(id, "removing from watchlist");
        self.delete(&format!("/watchlist/{id}")).await
    }

    /// `PATCH /watchlist/{id}/whatsapp` with `{ notify_whatsapp }`
    pub async fn watchlist_set_whatsapp(&self, id: i64, notify: bool) -> Result<WatchlistItem> {
        info!(id, notify, "setting whatsapp notification");
        self.patch_json(
            &format!("/watchlist/{id}/whatsapp"),
            &SetWhatsappRequest {
                notify_whatsapp: notify,
            },
        )
        .await
    }
}
