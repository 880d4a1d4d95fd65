//! Profile endpoints

use super::ApiClient;
use crate::error::Result;
use crate::models::Profile;
use serde::Serialize;

/// Partial profile update; absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.email.is_none() && self.phone_number.is_none()
    }
}

impl ApiClient {
    /// `GET /profile/me`
    pub async fn profile(&self) -> Result<Profile> {
        self.get_json("/profile/me", &[]).await
    }

    /// `PUT /profile/me`
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile> {
        self.put_json("/profile/me", update).await
    }
}
