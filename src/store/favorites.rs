//! Client-local favorites set
//!
//! Favorites are a client-only annotation layer: a set of uppercase symbols
//! persisted as a JSON list in the data directory, with no server counterpart.
//! The file is the single source of truth; every query re-reads it so that no
//! private cache can desync from storage. Every mutation broadcasts
//! [`AppEvent::FavoritesUpdated`] so other mounted views re-read the set.

use crate::error::Result;
use crate::events::{AppEvent, EventBus};
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Well-known file name under the data directory
pub const FAVORITES_FILE: &str = "favorites.json";

/// File-backed store for the favorites symbol set
pub struct FavoritesStore {
    path: PathBuf,
    events: EventBus,
}

impl FavoritesStore {
    pub fn new(path: PathBuf, events: EventBus) -> Self {
        Self { path, events }
    }

    /// Membership test, case-insensitive. Reads storage fresh.
    pub fn is_favorite(&self, symbol: &str) -> bool {
        self.read().contains(&normalize(symbol))
    }

    /// Flip membership for a symbol and return the new state: an absent symbol
    /// is added, a present one is removed. Repeated calls alternate.
    pub fn toggle(&self, symbol: &str) -> Result<bool> {
        let symbol = normalize(symbol);
        let mut set = self.read();

        let now_favorite = if set.contains(&symbol) {
            set.remove(&symbol);
            false
        } else {
            set.insert(symbol.clone());
            true
        };

        self.write(&set)?;
        debug!(%symbol, now_favorite, "toggled favorite");
        self.events.emit(AppEvent::FavoritesUpdated);

        Ok(now_favorite)
    }

    /// The full favorites set, uppercased. Reads storage fresh.
    pub fn read(&self) -> BTreeSet<String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return BTreeSet::new(),
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(symbols) => symbols.iter().map(|s| normalize(s)).collect(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable favorites file, treating as empty");
                BTreeSet::new()
            }
        }
    }

    fn write(&self, set: &BTreeSet<String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let symbols: Vec<&String> = set.iter().collect();
        fs::write(&self.path, serde_json::to_string(&symbols)?)?;
        Ok(())
    }
}

fn normalize(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}
