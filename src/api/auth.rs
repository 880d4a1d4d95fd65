//! Authentication endpoints
//!
//! Identity is delegated to an external provider; this client only handles
//! the token contract: obtain a bearer token from a login/verify endpoint,
//! persist it, and send it on every call.

use super::ApiClient;
use crate::error::{AppError, Result};
use crate::models::UserInfo;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct SignupRequest {
    pub phone_number: String,
    pub display_name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupResponse {
    pub msg: String,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

#[derive(Debug, Serialize)]
struct PhoneOtpLoginRequest<'a> {
    phone_number: &'a str,
    otp: &'a str,
}

#[derive(Debug, Serialize)]
struct VerifyTokenRequest<'a> {
    id_token: &'a str,
}

/// Response of `/login` and `/verify-token`: a fresh bearer token plus the
/// authenticated user.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub msg: String,
    pub token: String,
    pub user: UserInfo,
}

impl ApiClient {
    /// `POST /signup`
    pub async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse> {
        self.post_json("/signup", request).await
    }

    /// `POST /login` with phone number + OTP
    pub async fn login_with_phone_otp(&self, phone_number: &str, otp: &str) -> Result<TokenResponse> {
        self.post_json("/login", &PhoneOtpLoginRequest { phone_number, otp })
            .await
    }

    /// `POST /verify-token` with an identity-provider id token
    pub async fn verify_id_token(&self, id_token: &str) -> Result<TokenResponse> {
        self.post_json("/verify-token", &VerifyTokenRequest { id_token })
            .await
    }

    /// `GET /me` — the user behind the stored token, or `None` when the token
    /// is missing or expired.
    pub async fn current_user(&self) -> Result<Option<UserInfo>> {
        match self.get_json::<UserInfo>("/me", &[]).await {
            Ok(user) => Ok(Some(user)),
            Err(AppError::Auth(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
