//! Company catalog endpoints

use super::ApiClient;
use crate::error::Result;
use crate::models::CatalogEntry;

fn catalog_query(q: &str, limit: usize, exchange: Option<&str>) -> Vec<(&'static str, String)> {
    let mut query = vec![("q", q.to_string()), ("limit", limit.to_string())];
    if let Some(exchange) = exchange {
        query.push(("exchange", exchange.to_string()));
    }
    query
}

impl ApiClient {
    /// `GET /companies?q=&limit=` — bulk catalog load for the session cache.
    pub async fn companies(
        &self,
        q: &str,
        limit: usize,
        exchange: Option<&str>,
    ) -> Result<Vec<CatalogEntry>> {
        self.get_json("/companies", &catalog_query(q, limit, exchange))
            .await
    }

    /// `GET /companies/search?q=&limit=&exchange=` — typeahead lookup.
    pub async fn companies_search(
        &self,
        q: &str,
        limit: usize,
        exchange: Option<&str>,
    ) -> Result<Vec<CatalogEntry>> {
        self.get_json("/companies/search", &catalog_query(q, limit, exchange))
            .await
    }
}
