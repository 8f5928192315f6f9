use std::sync::Mutex;

use slateboard::modules::auth::model::AuthError;
use slateboard::modules::auth::wechat::CodeExchanger;
use slateboard::modules::users::model::User;
use slateboard::modules::users::store::UserStore;
use slateboard::utils::errors::AppError;

/// In-memory stand-in for the persistence collaborator.
#[derive(Default)]
pub struct MemoryUserStore {
    pub users: Vec<User>,
    pub logins: Mutex<Vec<(i64, Option<String>)>>,
}

impl MemoryUserStore {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users,
            logins: Mutex::new(Vec::new()),
        }
    }
}

impl UserStore for MemoryUserStore {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, AppError> {
        // Same resolution order as the SQL store: username, email, phone.
        type Field = fn(&User) -> Option<&str>;
        let fields: [Field; 3] = [
            |u| u.username.as_deref(),
            |u| u.email.as_deref(),
            |u| u.phone.as_deref(),
        ];

        for field in fields {
            if let Some(user) = self.users.iter().find(|u| field(u) == Some(identifier)) {
                return Ok(Some(user.clone()));
            }
        }
        Ok(None)
    }

    async fn find_by_wechat_openid(&self, openid: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .iter()
            .find(|u| u.wechat_openid.as_deref() == Some(openid))
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }

    async fn update_password(&self, _id: i64, _new_hash: &str) -> Result<(), AppError> {
        Ok(())
    }

    fn record_login(&self, id: i64, ip: Option<String>) {
        self.logins.lock().unwrap().push((id, ip));
    }
}

/// Identity-provider stub: succeeds with a fixed openid or fails the
/// exchange.
pub struct StubExchanger {
    pub openid: Option<String>,
}

impl CodeExchanger for StubExchanger {
    async fn exchange_code(&self, _code: &str) -> Result<String, AuthError> {
        self.openid.clone().ok_or(AuthError::ExternalExchangeFailed)
    }
}

#[allow(dead_code)]
pub fn user(id: i64, username: &str, password: &str, user_type: Option<i32>) -> User {
    User {
        id,
        username: Some(username.to_string()),
        password: Some(bcrypt::hash(password, 4).unwrap()),
        email: None,
        phone: None,
        user_type,
        nickname: None,
        avatar_url: None,
        status: Some(0),
        wechat_openid: None,
    }
}
