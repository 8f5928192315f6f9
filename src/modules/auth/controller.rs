use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use tracing::instrument;

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{LoginRequest, TokenResponse, WechatLoginRequest};
use super::service::AuthService;

/// Login with username/email/phone and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials or identity mismatch"),
        (status = 403, description = "Account disabled"),
        (status = 400, description = "Validation error")
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let login_ip = client_ip(&headers);
    let response = AuthService::login(&state.users, dto, login_ip, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Login through the WeChat mini-program authorization code
#[utoipa::path(
    post,
    path = "/api/auth/wechat/login",
    request_body = WechatLoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid code or identity mismatch"),
        (status = 403, description = "Account disabled"),
        (status = 404, description = "WeChat account not linked"),
        (status = 400, description = "Validation error")
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn wechat_login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<WechatLoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let response =
        AuthService::wechat_login(&state.users, &state.wechat, dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Client address for last-login bookkeeping: first hop of
/// `X-Forwarded-For`, then `X-Real-IP`. Absent behind no proxy.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        let first = forwarded.split(',').next().map(str::trim).unwrap_or("");
        if !first.is_empty() && !first.eq_ignore_ascii_case("unknown") {
            return Some(first.to_string());
        }
    }

    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn client_ip_takes_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1, 10.0.0.2"),
        );
        assert_eq!(client_ip(&headers), Some("203.0.113.9".to_string()));
    }

    #[test]
    fn client_ip_falls_back_to_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("unknown"));
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.7"));
        assert_eq!(client_ip(&headers), Some("198.51.100.7".to_string()));
    }

    #[test]
    fn client_ip_absent_without_proxy_headers() {
        assert_eq!(client_ip(&HeaderMap::new()), None);
    }
}
