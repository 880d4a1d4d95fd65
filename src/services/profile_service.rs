//! Profile reads and validated updates

use crate::api::profile::ProfileUpdate;
use crate::api::ApiClient;
use crate::error::{AppError, Result};
use crate::models::Profile;
use tracing::info;

pub struct ProfileService;

impl ProfileService {
    pub async fn profile(api: &ApiClient) -> Result<Profile> {
        api.profile().await
    }

    /// Update the profile. Validation failures are caught before any remote
    /// call is issued.
    pub async fn update(api: &ApiClient, update: &ProfileUpdate) -> Result<Profile> {
        validate(update)?;
        info!("updating profile");
        api.update_profile(update).await
    }
}

fn validate(update: &ProfileUpdate) -> Result<()> {
    if update.is_empty() {
        return Err(AppError::Validation("nothing to update".to_string()));
    }

    if let Some(name) = &update.display_name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("display name must not be empty".to_string()));
        }
    }

    if let Some(email) = &update.email {
        if !email.contains('@') {
            return Err(AppError::Validation(format!("invalid email: {email}")));
        }
    }

    Ok(())
}
