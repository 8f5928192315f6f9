use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

use super::controller::{change_password, me};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/me/password", put(change_password))
}
