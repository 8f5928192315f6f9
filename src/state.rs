use sqlx::PgPool;

use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::jwt::JwtConfig;
use crate::config::wechat::WechatConfig;
use crate::modules::auth::wechat::WechatClient;
use crate::modules::users::store::PgUserStore;

/// Shared, read-only application state. Built once at startup; everything
/// here is cheap to clone per request.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub users: PgUserStore,
    pub wechat: WechatClient,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

pub async fn init_app_state() -> AppState {
    let db = init_db_pool().await;

    AppState {
        users: PgUserStore::new(db.clone()),
        wechat: WechatClient::new(WechatConfig::from_env()),
        db,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    }
}
