//! Backend REST client
//!
//! Every call carries `Authorization: Bearer <token>` when a token is stored.
//! A 401 response clears the stored token and surfaces as [`AppError::Auth`];
//! a 409 surfaces as [`AppError::Conflict`] so callers can treat duplicate
//! adds as informational.

pub mod auth;
pub mod companies;
pub mod news;
pub mod profile;
pub mod watchlist;

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::models::{CatalogEntry, WatchlistItem};
use crate::store::TokenStore;
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// The backend operations the watchlist core depends on.
///
/// Services and stores take this trait instead of [`ApiClient`] directly so
/// they can be exercised against an in-memory backend in tests.
#[async_trait]
pub trait BackendApi: Send + Sync {
    async fn fetch_watchlist(&self) -> Result<Vec<WatchlistItem>>;

    /// `POST /watchlist`; the backend answers 409 when the symbol is already
    /// present for the user.
    async fn add_to_watchlist(
        &self,
        symbol: &str,
        exchange: Option<&str>,
    ) -> Result<WatchlistItem>;

    async fn remove_from_watchlist(&self, id: i64) -> Result<()>;

    async fn set_whatsapp(&self, id: i64, notify: bool) -> Result<WatchlistItem>;

    async fn fetch_companies(
        &self,
        q: &str,
        limit: usize,
        exchange: Option<&str>,
    ) -> Result<Vec<CatalogEntry>>;

    async fn search_companies(
        &self,
        q: &str,
        limit: usize,
        exchange: Option<&str>,
    ) -> Result<Vec<CatalogEntry>>;
}

/// Authenticated HTTP client for the Stoxie backend
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Arc<TokenStore>,
}

impl ApiClient {
    pub fn new(config: &AppConfig, token: Arc<TokenStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer token when one is stored. An unreadable keychain is
    /// treated as "no token": the backend will answer 401 if auth was needed.
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token.get() {
            Ok(Some(token)) => builder.bearer_auth(token),
            Ok(None) => builder,
            Err(e) => {
                warn!(error = %e, "could not read stored token");
                builder
            }
        }
    }

    /// Classify the response status. 401 invalidates the stored token; the
    /// caller must re-authenticate, there is no automatic retry.
    async fn check(&self, response: Response) -> Result<Response> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!("backend returned 401, clearing stored token");
            if let Err(e) = self.token.clear() {
                warn!(error = %e, "failed to clear stored token");
            }
            return Err(AppError::Auth("session expired, sign in again".to_string()));
        }

        if status == StatusCode::CONFLICT {
            let message = response.text().await.unwrap_or_default();
            let message = if message.is_empty() {
                "already in watchlist".to_string()
            } else {
                message
            };
            return Err(AppError::Conflict(message));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AppError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        debug!(path, "GET");
        let request = self.authorize(self.http.get(self.url(path)).query(query));
        let response = self.check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        debug!(path, "POST");
        let request = self.authorize(self.http.post(self.url(path)).json(body));
        let response = self.check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        debug!(path, "PUT");
        let request = self.authorize(self.http.put(self.url(path)).json(body));
        let response = self.check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        debug!(path, "PATCH");
        let request = self.authorize(self.http.patch(self.url(path)).json(body));
        let response = self.check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        debug!(path, "DELETE");
        let request = self.authorize(self.http.delete(self.url(path)));
        self.check(request.send().await?).await?;
        Ok(())
    }
}

#[async_trait]
impl BackendApi for ApiClient {
    async fn fetch_watchlist(&self) -> Result<Vec<WatchlistItem>> {
        self.watchlist().await
    }

    async fn add_to_watchlist(
        &self,
        symbol: &str,
        exchange: Option<&str>,
    ) -> Result<WatchlistItem> {
        self.watchlist_add(symbol, exchange).await
    }

    async fn remove_from_watchlist(&self, id: i64) -> Result<()> {
        self.watchlist_remove(id).await
    }

    async fn set_whatsapp(&self, id: i64, notify: bool) -> Result<WatchlistItem> {
        self.watchlist_set_whatsapp(id, notify).await
    }

    async fn fetch_companies(
        &self,
        q: &str,
        limit: usize,
        exchange: Option<&str>,
    ) -> Result<Vec<CatalogEntry>> {
        self.companies(q, limit, exchange).await
    }

    async fn search_companies(
        &self,
        q: &str,
        limit: usize,
        exchange: Option<&str>,
    ) -> Result<Vec<CatalogEntry>> {
        self.companies_search(q, limit, exchange).await
    }
}
