//! Persistence collaborator for user records.
//!
//! [`UserStore`] is the seam between the authentication core and the
//! database: the login flow and the request authenticator only ever see
//! this trait, so tests can substitute an in-memory store.

use std::future::Future;

use sqlx::PgPool;

use crate::utils::errors::AppError;

use super::model::User;

const USER_COLUMNS: &str = "id, username, password, email, phone, user_type, \
     nickname, avatar_url, status, wechat_openid";

pub trait UserStore: Send + Sync {
    /// Resolves a login identifier, trying username, then email, then phone.
    fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> impl Future<Output = Result<Option<User>, AppError>> + Send;

    fn find_by_wechat_openid(
        &self,
        openid: &str,
    ) -> impl Future<Output = Result<Option<User>, AppError>> + Send;

    fn find_by_id(&self, id: i64) -> impl Future<Output = Result<Option<User>, AppError>> + Send;

    fn update_password(
        &self,
        id: i64,
        new_hash: &str,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Best-effort last-login bookkeeping. Must not block or fail the
    /// caller; implementations log and move on.
    fn record_login(&self, id: i64, ip: Option<String>);
}

#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_by_column(&self, column: &str, value: &str) -> Result<Option<User>, AppError> {
        let query = format!("SELECT {USER_COLUMNS} FROM sys_user WHERE {column} = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}

impl UserStore for PgUserStore {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, AppError> {
        for column in ["username", "email", "phone"] {
            if let Some(user) = self.fetch_by_column(column, identifier).await? {
                return Ok(Some(user));
            }
        }
        Ok(None)
    }

    async fn find_by_wechat_openid(&self, openid: &str) -> Result<Option<User>, AppError> {
        self.fetch_by_column("wechat_openid", openid).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let query = format!("SELECT {USER_COLUMNS} FROM sys_user WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn update_password(&self, id: i64, new_hash: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE sys_user SET password = $2 WHERE id = $1")
            .bind(id)
            .bind(new_hash)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    fn record_login(&self, id: i64, ip: Option<String>) {
        let pool = self.pool.clone();
        tokio::spawn(async move {
            let result =
                sqlx::query("UPDATE sys_user SET last_login_time = NOW(), last_login_ip = $2 WHERE id = $1")
                    .bind(id)
                    .bind(ip)
                    .execute(&pool)
                    .await;

            if let Err(e) = result {
                tracing::warn!(user_id = id, error = %e, "failed to record last login");
            }
        });
    }
}
