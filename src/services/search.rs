//! Search-as-you-type with a last-issued-wins policy
//!
//! Each lookup is tagged with a sequence number; a response that lands after
//! a newer query was issued is discarded instead of overwriting fresher
//! results. Requests are not cancelled, only their results ignored.

use crate::api::BackendApi;
use crate::error::Result;
use crate::models::CatalogEntry;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Default suggestion count for the add-company typeahead
pub const SEARCH_LIMIT: usize = 20;

/// One typeahead session (one per search box)
pub struct SearchSession {
    issued: AtomicU64,
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
        }
    }

    /// Look up companies for `query`. Returns `Ok(None)` when the response
    /// was superseded by a newer query, including superseded failures; only
    /// the latest-issued lookup ever surfaces.
    pub async fn search(
        &self,
        api: &dyn BackendApi,
        query: &str,
        limit: usize,
        exchange: Option<&str>,
    ) -> Result<Option<Vec<CatalogEntry>>> {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        let outcome = api.search_companies(query, limit, exchange).await;

        if self.issued.load(Ordering::SeqCst) != ticket {
            debug!(query, ticket, "discarding stale search response");
            return Ok(None);
        }

        outcome.map(Some)
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}
