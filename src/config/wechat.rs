use std::env;

/// WeChat mini-program credential exchange settings.
///
/// `api_base` is overridable so tests and staging can point the exchange at
/// a stub server instead of the live `code2session` endpoint.
#[derive(Clone, Debug)]
pub struct WechatConfig {
    pub app_id: String,
    pub app_secret: String,
    pub api_base: String,
}

impl WechatConfig {
    pub fn from_env() -> Self {
        Self {
            app_id: env::var("WECHAT_APP_ID").unwrap_or_default(),
            app_secret: env::var("WECHAT_APP_SECRET").unwrap_or_default(),
            api_base: env::var("WECHAT_API_BASE")
                .unwrap_or_else(|_| "https://api.weixin.qq.com".to_string()),
        }
    }
}
