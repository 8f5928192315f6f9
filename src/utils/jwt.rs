//! Token codec: issues and verifies the signed bearer tokens that carry a
//! login identifier between requests.
//!
//! Tokens are HS256 JWTs with three claims: `sub` (the login identifier the
//! token was issued over), `iat`, and `exp`. No role or permission data is
//! embedded; authorization state is always re-derived from the user record.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::jwt::JwtConfig;
use crate::utils::errors::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Why a presented token was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Not a structurally valid token at all.
    Malformed,
    /// Well-formed but the signature does not verify under our key.
    SignatureInvalid,
    /// Signature verified but the token is past its expiry instant.
    Expired,
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::Malformed => write!(f, "malformed token"),
            TokenError::SignatureInvalid => write!(f, "invalid token signature"),
            TokenError::Expired => write!(f, "token expired"),
        }
    }
}

impl std::error::Error for TokenError {}

/// Issues a token over `subject`, valid for `jwt_config.access_token_expiry`
/// seconds from now.
pub fn issue_token(subject: &str, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp();

    let claims = Claims {
        sub: subject.to_string(),
        iat: now,
        exp: now + jwt_config.access_token_expiry,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("failed to sign token: {e}")))
}

/// Decodes and verifies a token.
///
/// Expiry is checked here rather than by the JWT library so the boundary is
/// exact: a token is valid while `now < exp` and rejected from the `exp`
/// instant onward, with no clock-skew leeway.
pub fn decode_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
        _ => TokenError::Malformed,
    })?;

    if Utc::now().timestamp() >= claims.exp {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}
