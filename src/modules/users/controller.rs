use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{ChangePasswordRequest, MessageResponse, UserProfile};
use super::service::UserService;

/// Profile of the authenticated user
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current user profile", body = UserProfile),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn me(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
) -> Result<Json<UserProfile>, AppError> {
    let profile = UserService::profile(&state.users, principal.id).await?;
    Ok(Json(profile))
}

/// Change the authenticated user's password
#[utoipa::path(
    put,
    path = "/api/users/me/password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 401, description = "Not authenticated or wrong current password"),
        (status = 400, description = "Validation error")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn change_password(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    ValidatedJson(dto): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    UserService::change_password(&state.users, principal.id, dto).await?;
    Ok(Json(MessageResponse {
        message: "Password updated".to_string(),
    }))
}
