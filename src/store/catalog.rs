//! Session cache for the company catalog
//!
//! The catalog is reference data: fetched once per page session, cached until
//! explicitly invalidated. Callers treat it as optional; when the fetch fails
//! the cache stays unset and views fall back to placeholder sector/price.

use crate::api::BackendApi;
use crate::error::Result;
use crate::models::CatalogEntry;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, info};

struct Cached {
    entries: Vec<CatalogEntry>,
    fetched_at: DateTime<Utc>,
}

/// Fetch-once cache over `GET /companies`
pub struct CatalogCache {
    inner: RwLock<Option<Cached>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    /// The cached catalog, or a fresh fetch on first use. Idempotent within a
    /// session: later calls return the cached value without a round trip.
    pub async fn get_or_fetch(
        &self,
        api: &dyn BackendApi,
        limit: usize,
    ) -> Result<Vec<CatalogEntry>> {
        if let Some(cached) = self.inner.read().as_ref() {
            debug!(
                entries = cached.entries.len(),
                fetched_at = %cached.fetched_at,
                "catalog cache hit"
            );
            return Ok(cached.entries.clone());
        }

        // A failed fetch leaves the cache unset so the next call retries.
        let entries = api.fetch_companies("", limit, None).await?;
        info!(entries = entries.len(), "loaded company catalog");

        *self.inner.write() = Some(Cached {
            entries: entries.clone(),
            fetched_at: Utc::now(),
        });

        Ok(entries)
    }

    /// The cached catalog without fetching, if loaded.
    pub fn cached(&self) -> Option<Vec<CatalogEntry>> {
        self.inner.read().as_ref().map(|c| c.entries.clone())
    }

    /// Drop the cached catalog; the next `get_or_fetch` hits the network.
    pub fn invalidate(&self) {
        debug!("invalidating catalog cache");
        *self.inner.write() = None;
    }
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new()
    }
}
