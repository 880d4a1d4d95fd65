//! Auth token storage via the OS keychain
//!
//! The token is an opaque bearer string obtained from the login/verify
//! endpoints. A 401 from the backend means the stored token is invalid and
//! must be cleared, forcing re-authentication.

use crate::error::Result;
use keyring::Entry;
use tracing::debug;

const SERVICE: &str = "stoxie";
const TOKEN_KEY: &str = "auth-token";

/// Keychain-backed store for the backend bearer token
pub struct TokenStore {
    service: &'static str,
}

impl TokenStore {
    pub fn new() -> Self {
        Self { service: SERVICE }
    }

    /// Read the stored token, if any.
    pub fn get(&self) -> Result<Option<String>> {
        let entry = Entry::new(self.service, TOKEN_KEY)?;

        match entry.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist a freshly issued token.
    pub fn set(&self, token: &str) -> Result<()> {
        let entry = Entry::new(self.service, TOKEN_KEY)?;
        entry.set_password(token)?;
        debug!("stored auth token");
        Ok(())
    }

    /// Remove the stored token. Clearing an absent token is a no-op.
    pub fn clear(&self) -> Result<()> {
        let entry = Entry::new(self.service, TOKEN_KEY)?;

        match entry.delete_password() {
            Ok(()) => {
                debug!("cleared auth token");
                Ok(())
            }
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}
