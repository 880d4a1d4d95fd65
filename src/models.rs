//! Wire and view models
//!
//! Field names on the serde side are bit-exact against the backend contract:
//! `notify_whatsapp`, `companyName`, `phone_number`, `display_name`.

use serde::{Deserialize, Serialize};

/// One server-persisted watchlist entry. The id is the sole stable identity;
/// symbol uniqueness per user is enforced server-side (duplicate add is a 409).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistItem {
    pub id: i64,
    pub symbol: String,
    pub name: String,
    pub sector: Option<String>,
    #[serde(default)]
    pub notify_whatsapp: bool,
}

/// Read-only company reference data from `GET /companies`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(default)]
    pub catalog_id: Option<i64>,
    pub symbol: String,
    #[serde(rename = "companyName")]
    pub company_name: String,
    pub sector: String,
    pub exchange: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// UI-ready projection of one watchlist item joined with catalog data.
/// Derived and ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub id: i64,
    pub ticker: String,
    pub name: String,
    pub price: f64,
    pub sector: String,
    pub whatsapp_enabled: bool,
}

/// One item from `GET /news`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default)]
    pub id: Option<String>,
    pub source: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub market_impact: Option<String>,
    #[serde(default)]
    pub sentiment_score: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
}

/// Authenticated user identity from `/me` and the login endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub uid: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// User profile from `GET /profile/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub uid: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}
