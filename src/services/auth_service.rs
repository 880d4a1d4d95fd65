//! Login flows and session handling
//!
//! The backend issues an opaque bearer token from its login/verify endpoints;
//! this service persists it and hands back the authenticated user. A 401 on
//! any later call clears the token (handled in the API client) and the user
//! must sign in again.

use crate::api::auth::{SignupRequest, SignupResponse, TokenResponse};
use crate::api::ApiClient;
use crate::error::Result;
use crate::models::UserInfo;
use crate::store::TokenStore;
use chrono::{DateTime, Utc};
use tracing::info;

/// An authenticated session
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: UserInfo,
    pub authenticated_at: DateTime<Utc>,
}

pub struct AuthService;

impl AuthService {
    /// Register a new user. No token is issued; the user signs in afterwards.
    pub async fn signup(api: &ApiClient, request: &SignupRequest) -> Result<SignupResponse> {
        api.signup(request).await
    }

    /// Sign in with phone number + OTP and persist the issued token.
    pub async fn login_with_phone_otp(
        api: &ApiClient,
        tokens: &TokenStore,
        phone_number: &str,
        otp: &str,
    ) -> Result<AuthSession> {
        let response = api.login_with_phone_otp(phone_number, otp).await?;
        Self::store_session(tokens, response)
    }

    /// Sign in with an identity-provider id token and persist the issued token.
    pub async fn login_with_id_token(
        api: &ApiClient,
        tokens: &TokenStore,
        id_token: &str,
    ) -> Result<AuthSession> {
        let response = api.verify_id_token(id_token).await?;
        Self::store_session(tokens, response)
    }

    /// The user behind the stored token, or `None` when signed out or expired.
    pub async fn current_user(api: &ApiClient) -> Result<Option<UserInfo>> {
        api.current_user().await
    }

    /// Forget the stored token.
    pub fn logout(tokens: &TokenStore) -> Result<()> {
        info!("logging out");
        tokens.clear()
    }

    fn store_session(tokens: &TokenStore, response: TokenResponse) -> Result<AuthSession> {
        tokens.set(&response.token)?;
        info!(uid = %response.user.uid, "authenticated");

        Ok(AuthSession {
            user: response.user,
            authenticated_at: Utc::now(),
        })
    }
}
