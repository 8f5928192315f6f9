//! WeChat mini-program identity exchange.
//!
//! The mini-program hands the client an opaque authorization code; the
//! server swaps it for a stable `openid` through the `jscode2session`
//! endpoint. The exchange is a black box from the login flow's point of
//! view: it either yields an external subject identifier or fails.

use std::future::Future;

use serde::Deserialize;
use tracing::warn;

use crate::config::wechat::WechatConfig;

use super::model::AuthError;

pub trait CodeExchanger: Send + Sync {
    /// Exchanges an authorization code for the external subject identifier.
    fn exchange_code(&self, code: &str) -> impl Future<Output = Result<String, AuthError>> + Send;
}

#[derive(Debug, Clone)]
pub struct WechatClient {
    http: reqwest::Client,
    config: WechatConfig,
}

impl WechatClient {
    pub fn new(config: WechatConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    openid: Option<String>,
    errcode: Option<i32>,
    errmsg: Option<String>,
}

impl CodeExchanger for WechatClient {
    async fn exchange_code(&self, code: &str) -> Result<String, AuthError> {
        let url = format!("{}/sns/jscode2session", self.config.api_base);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("appid", self.config.app_id.as_str()),
                ("secret", self.config.app_secret.as_str()),
                ("js_code", code),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "wechat code exchange request failed");
                AuthError::ExternalExchangeFailed
            })?;

        let session: SessionResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "wechat code exchange returned an unreadable body");
            AuthError::ExternalExchangeFailed
        })?;

        match session.openid {
            Some(openid) if !openid.is_empty() => Ok(openid),
            _ => {
                warn!(
                    errcode = session.errcode,
                    errmsg = session.errmsg.as_deref().unwrap_or(""),
                    "wechat rejected the authorization code"
                );
                Err(AuthError::ExternalExchangeFailed)
            }
        }
    }
}
