use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{login, wechat_login};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/wechat/login", post(wechat_login))
}
