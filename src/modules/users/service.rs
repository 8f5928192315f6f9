use crate::utils::errors::AppError;
use crate::utils::password::{hash_password, verify_password};

use super::model::{ChangePasswordRequest, User, UserProfile};
use super::store::UserStore;

pub struct UserService;

impl UserService {
    pub async fn profile(store: &impl UserStore, user_id: i64) -> Result<UserProfile, AppError> {
        let user = Self::load(store, user_id).await?;
        Ok(user.profile())
    }

    /// Verifies the current secret before storing a new hash. Accounts
    /// without a stored password (WeChat-only) cannot change one here.
    pub async fn change_password(
        store: &impl UserStore,
        user_id: i64,
        dto: ChangePasswordRequest,
    ) -> Result<(), AppError> {
        let user = Self::load(store, user_id).await?;

        let stored_hash = user
            .password
            .as_deref()
            .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Account has no password set")))?;

        if !verify_password(&dto.old_password, stored_hash)? {
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Current password is incorrect"
            )));
        }

        let new_hash = hash_password(&dto.new_password)?;
        store.update_password(user_id, &new_hash).await
    }

    async fn load(store: &impl UserStore, user_id: i64) -> Result<User, AppError> {
        store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }
}
