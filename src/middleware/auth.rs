//! Per-request authentication.
//!
//! [`authenticate`] runs on every request: it pulls the bearer token,
//! decodes it, re-resolves the user, revalidates the subject against the
//! fresh record, and attaches a [`Principal`] to the request extensions.
//! Every failure along the way is soft: the request continues without a
//! principal and [`crate::middleware::policy::require_authentication`]
//! decides downstream whether that matters. A bad token on a public route
//! must never break the request.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::modules::users::model::{User, resolve_role};
use crate::modules::users::store::UserStore;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{Claims, decode_token};

/// The authenticated identity of one request. Built fresh per request from
/// the stored record, never persisted, immutable once attached.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: i64,
    pub display_name: String,
    pub role: String,
}

pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    // Idempotent: an identity attached earlier in the chain is never
    // overwritten.
    if req.extensions().get::<Principal>().is_none() {
        if let Some(principal) = resolve_principal(&state, req.headers()).await {
            req.extensions_mut().insert(principal);
        }
    }

    next.run(req).await
}

async fn resolve_principal(state: &AppState, headers: &HeaderMap) -> Option<Principal> {
    let header_value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = header_value.strip_prefix("Bearer ")?;

    let claims = match decode_token(token, &state.jwt_config) {
        Ok(claims) => claims,
        Err(e) => {
            debug!(error = %e, "rejected bearer token");
            return None;
        }
    };

    // WeChat-only accounts carry their openid as the token subject.
    let lookup = async {
        match state.users.find_by_identifier(&claims.sub).await? {
            Some(user) => Ok(Some(user)),
            None => state.users.find_by_wechat_openid(&claims.sub).await,
        }
    };

    let user = match lookup.await {
        Ok(Some(user)) => user,
        Ok(None) => {
            debug!(subject = %claims.sub, "token subject resolves to no user");
            return None;
        }
        Err(e) => {
            debug!(error = %e.error, "user lookup failed during authentication");
            return None;
        }
    };

    principal_from(&claims, &user)
}

/// Final revalidation: the resolved record must still answer to the token's
/// subject and must not be disabled.
pub fn principal_from(claims: &Claims, user: &User) -> Option<Principal> {
    if !user.matches_identifier(&claims.sub) {
        return None;
    }
    if user.is_disabled() {
        return None;
    }

    Some(Principal {
        id: user.id,
        display_name: user.display_name().to_string(),
        role: resolve_role(user.user_type).to_string(),
    })
}

/// Extractor for handlers on protected routes: yields the request's
/// [`Principal`] or rejects with 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Principal);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("Not authenticated")))
    }
}

/// Extractor for handlers that behave differently for signed-in users but
/// serve anonymous ones too. Never rejects.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<Principal>);

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(parts.extensions.get::<Principal>().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_user() -> User {
        User {
            id: 7,
            username: Some("alice".into()),
            password: None,
            email: Some("alice@example.com".into()),
            phone: None,
            user_type: Some(2),
            nickname: Some("Alice".into()),
            avatar_url: None,
            status: Some(0),
            wechat_openid: None,
        }
    }

    fn claims_for(sub: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            iat: 0,
            exp: i64::MAX,
        }
    }

    #[test]
    fn principal_built_from_matching_record() {
        let principal = principal_from(&claims_for("alice"), &stored_user()).unwrap();
        assert_eq!(principal.id, 7);
        assert_eq!(principal.display_name, "Alice");
        assert_eq!(principal.role, "ROLE_TEACHER");
    }

    #[test]
    fn principal_accepts_any_login_identifier_as_subject() {
        assert!(principal_from(&claims_for("alice@example.com"), &stored_user()).is_some());
    }

    #[test]
    fn subject_mismatch_yields_no_principal() {
        assert!(principal_from(&claims_for("mallory"), &stored_user()).is_none());
    }

    #[test]
    fn disabled_account_yields_no_principal() {
        let mut user = stored_user();
        user.status = Some(1);
        assert!(principal_from(&claims_for("alice"), &user).is_none());
    }
}
