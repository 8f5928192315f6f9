use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::errors::AppError;

/// Login request. `identifier` may be a username, email, or phone number;
/// `user_type` is the classification the caller claims to be logging in as
/// and must match the stored record when present.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Identifier is required"))]
    pub identifier: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    pub user_type: Option<i32>,
}

/// WeChat mini-program login: an opaque authorization code from
/// `wx.login()` plus the optional expected classification.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct WechatLoginRequest {
    #[validate(length(min = 1, message = "Authorization code is required"))]
    pub code: String,
    pub user_type: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user_id: i64,
    pub username: Option<String>,
    pub nickname: Option<String>,
    pub avatar: Option<String>,
    pub user_type: Option<i32>,
    pub role: String,
}

/// Login-flow failures, kind-distinct so callers and tests can tell them
/// apart. The HTTP mapping deliberately collapses `NotFound` and
/// `BadCredentials` into one message to resist credential enumeration.
#[derive(Debug)]
pub enum AuthError {
    /// No account matches the presented identifier.
    NotFound,
    /// Secret does not match the stored hash.
    BadCredentials,
    /// Account exists but its status flag marks it disabled.
    Disabled,
    /// Requested classification disagrees with the stored one.
    IdentityMismatch,
    /// The identity provider rejected or failed the code exchange.
    ExternalExchangeFailed,
    /// The external subject is not linked to any account.
    NotBound,
    /// Infrastructure failure; surfaced as a generic server error.
    Internal(anyhow::Error),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::NotFound => write!(f, "account not found"),
            AuthError::BadCredentials => write!(f, "bad credentials"),
            AuthError::Disabled => write!(f, "account disabled"),
            AuthError::IdentityMismatch => write!(f, "identity mismatch"),
            AuthError::ExternalExchangeFailed => write!(f, "external code exchange failed"),
            AuthError::NotBound => write!(f, "external identity not bound"),
            AuthError::Internal(e) => write!(f, "internal error: {e}"),
        }
    }
}

// No std::error::Error impl: that would collide with AppError's blanket
// `From<E: Into<anyhow::Error>>` conversion, and the explicit mapping below
// is the one that must win.
impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.error)
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            // One shared message: the response must not reveal whether the
            // identifier or the secret was wrong.
            AuthError::NotFound | AuthError::BadCredentials => {
                AppError::unauthorized(anyhow::anyhow!("Invalid username or password"))
            }
            AuthError::Disabled => AppError::forbidden(anyhow::anyhow!("Account is disabled")),
            AuthError::IdentityMismatch => AppError::unauthorized(anyhow::anyhow!(
                "Account type does not match the requested login identity"
            )),
            AuthError::ExternalExchangeFailed => {
                AppError::unauthorized(anyhow::anyhow!("Invalid WeChat authorization code"))
            }
            AuthError::NotBound => AppError::not_found(anyhow::anyhow!(
                "WeChat account is not linked to any user"
            )),
            AuthError::Internal(e) => AppError::internal(e),
        }
    }
}
