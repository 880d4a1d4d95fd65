//! Business logic over the API client and local stores

pub mod auth_service;
pub mod bulk;
pub mod profile_service;
pub mod search;
pub mod watchlist_service;

pub use auth_service::{AuthService, AuthSession};
pub use bulk::run_bounded;
pub use profile_service::ProfileService;
pub use search::SearchSession;
pub use watchlist_service::{
    companies_in_sector, group_by_sector, reconcile, AddOutcome, SectorAddSummary, WatchlistView,
};
