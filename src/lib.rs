//! Stoxie client core
//!
//! Client-side core of the Stoxie stock dashboard: the authenticated REST
//! client, the watchlist view model (catalog reconciliation and optimistic
//! mutation flows), the bounded-concurrency bulk runner behind "Add Sector",
//! the client-local favorites set, and the change-notification bus that keeps
//! independently mounted views consistent.

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod services;
pub mod state;
pub mod store;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging for a host application.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stoxie_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
