//! Login and token-issuance flows.
//!
//! Both flows end in [`AuthService::issue_for`]: status check,
//! classification check, role derivation, token issuance over the stored
//! login identifier, and the fire-and-forget last-login write.

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::{User, resolve_role};
use crate::modules::users::store::UserStore;
use crate::utils::jwt::issue_token;
use crate::utils::password::verify_password;

use super::model::{AuthError, LoginRequest, TokenResponse, WechatLoginRequest};
use super::wechat::CodeExchanger;

pub struct AuthService;

impl AuthService {
    /// Password login: resolve the identifier, verify the secret, then
    /// authorize and issue.
    pub async fn login(
        store: &impl UserStore,
        dto: LoginRequest,
        login_ip: Option<String>,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AuthError> {
        let user = store
            .find_by_identifier(&dto.identifier)
            .await?
            .ok_or(AuthError::NotFound)?;

        // Accounts created through WeChat binding may have no password at
        // all; treat that the same as a wrong one.
        let stored_hash = user.password.as_deref().ok_or(AuthError::BadCredentials)?;
        if !verify_password(&dto.password, stored_hash)? {
            return Err(AuthError::BadCredentials);
        }

        Self::issue_for(store, &user, dto.user_type, login_ip, jwt_config)
    }

    /// WeChat login: exchange the code for an openid, resolve the bound
    /// account, then authorize and issue. No credential check and no IP
    /// bookkeeping.
    pub async fn wechat_login(
        store: &impl UserStore,
        exchanger: &impl CodeExchanger,
        dto: WechatLoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AuthError> {
        let openid = exchanger.exchange_code(&dto.code).await?;

        let user = store
            .find_by_wechat_openid(&openid)
            .await?
            .ok_or(AuthError::NotBound)?;

        Self::issue_for(store, &user, dto.user_type, None, jwt_config)
    }

    fn issue_for(
        store: &impl UserStore,
        user: &User,
        requested_type: Option<i32>,
        login_ip: Option<String>,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AuthError> {
        if user.is_disabled() {
            return Err(AuthError::Disabled);
        }

        if let Some(requested) = requested_type {
            if user.user_type != Some(requested) {
                return Err(AuthError::IdentityMismatch);
            }
        }

        // Role is derived fresh from the stored classification at every
        // issuance; the token itself carries no role claim.
        let role = resolve_role(user.user_type);

        let subject = user.login_subject().ok_or_else(|| {
            AuthError::Internal(anyhow::anyhow!("user {} has no login identifier", user.id))
        })?;
        let token = issue_token(subject, jwt_config)?;

        store.record_login(user.id, login_ip);

        Ok(TokenResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: jwt_config.access_token_expiry,
            user_id: user.id,
            username: user.username.clone(),
            nickname: user.nickname.clone(),
            avatar: user.avatar_url.clone(),
            user_type: user.user_type,
            role: role.to_string(),
        })
    }
}
