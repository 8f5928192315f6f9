//! Route-level access policy.
//!
//! A static, ordered table marks routes public; everything else requires an
//! authenticated [`Principal`] before any handler runs. The table is built
//! once and read-only for the process lifetime.

use axum::{extract::Request, middleware::Next, response::Response};

use crate::middleware::auth::Principal;
use crate::utils::errors::AppError;

#[derive(Debug, Clone, Copy)]
pub enum Pattern {
    /// The path must match exactly.
    Exact(&'static str),
    /// The path must equal the prefix (sans trailing slash) or extend it.
    Prefix(&'static str),
}

impl Pattern {
    fn matches(&self, path: &str) -> bool {
        match self {
            Pattern::Exact(p) => path == *p,
            Pattern::Prefix(p) => {
                path.starts_with(p) || p.strip_suffix('/').is_some_and(|base| path == base)
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RoutePolicy {
    public: &'static [Pattern],
}

impl RoutePolicy {
    pub const fn new(public: &'static [Pattern]) -> Self {
        Self { public }
    }

    /// First matching pattern wins; an unmatched path requires
    /// authentication.
    pub fn is_public(&self, path: &str) -> bool {
        self.public.iter().any(|pattern| pattern.matches(path))
    }
}

/// Routes reachable without a token: the login endpoints themselves, public
/// assets, API documentation, and the health probe.
pub const PUBLIC_ROUTES: RoutePolicy = RoutePolicy::new(&[
    Pattern::Prefix("/api/auth/"),
    Pattern::Prefix("/public/"),
    Pattern::Prefix("/avatar/"),
    Pattern::Prefix("/swagger-ui"),
    Pattern::Prefix("/api-docs/"),
    Pattern::Prefix("/scalar"),
    Pattern::Exact("/health"),
    Pattern::Exact("/error"),
]);

/// Rejects unauthenticated requests to non-public routes before they reach
/// a handler. Runs after [`crate::middleware::auth::authenticate`], which
/// is what populates the `Principal` extension.
pub async fn require_authentication(req: Request, next: Next) -> Result<Response, AppError> {
    let path = req.uri().path();

    if PUBLIC_ROUTES.is_public(path) || req.extensions().get::<Principal>().is_some() {
        return Ok(next.run(req).await);
    }

    Err(AppError::unauthorized(anyhow::anyhow!(
        "Authentication required"
    )))
}
