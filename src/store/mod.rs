//! Client-local persisted state and session caches

pub mod catalog;
pub mod favorites;
pub mod token;

pub use catalog::CatalogCache;
pub use favorites::FavoritesStore;
pub use token::TokenStore;
