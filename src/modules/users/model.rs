use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Account classification stored on a user record.
///
/// The numeric codes come from the `sys_user.user_type` column: 1 student,
/// 2 teacher, 3 admin. Anything else is treated as an unclassified account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserType {
    Student,
    Teacher,
    Admin,
}

impl UserType {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(UserType::Student),
            2 => Some(UserType::Teacher),
            3 => Some(UserType::Admin),
            _ => None,
        }
    }

    pub fn role(&self) -> &'static str {
        match self {
            UserType::Student => "ROLE_STUDENT",
            UserType::Teacher => "ROLE_TEACHER",
            UserType::Admin => "ROLE_ADMIN",
        }
    }
}

/// Maps a stored classification code to its authorization role.
///
/// Total over the whole input domain: unknown and absent codes fall back to
/// `ROLE_USER` rather than failing.
pub fn resolve_role(user_type: Option<i32>) -> &'static str {
    user_type
        .and_then(UserType::from_code)
        .map(|t| t.role())
        .unwrap_or("ROLE_USER")
}

/// A row of `sys_user`. Read-mostly from this crate's point of view; the
/// only writes are the best-effort last-login update and password changes.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub user_type: Option<i32>,
    pub nickname: Option<String>,
    pub avatar_url: Option<String>,
    /// 0 (or NULL) is active; anything else is disabled.
    pub status: Option<i32>,
    pub wechat_openid: Option<String>,
}

impl User {
    pub fn is_disabled(&self) -> bool {
        matches!(self.status, Some(s) if s != 0)
    }

    /// The identifier a token is issued over: username first, then email,
    /// phone, and finally the WeChat openid for accounts that only ever
    /// signed in through the mini-program.
    pub fn login_subject(&self) -> Option<&str> {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .or(self.phone.as_deref())
            .or(self.wechat_openid.as_deref())
    }

    /// Whether `identifier` names this account under any of its login
    /// identifiers. Used to revalidate a decoded token subject against the
    /// freshly loaded record.
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        [
            self.username.as_deref(),
            self.email.as_deref(),
            self.phone.as_deref(),
            self.wechat_openid.as_deref(),
        ]
        .iter()
        .any(|field| *field == Some(identifier))
    }

    pub fn display_name(&self) -> &str {
        self.nickname
            .as_deref()
            .or(self.username.as_deref())
            .or(self.login_subject())
            .unwrap_or("")
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            nickname: self.nickname.clone(),
            avatar: self.avatar_url.clone(),
            user_type: self.user_type,
            role: resolve_role(self.user_type).to_string(),
        }
    }
}

/// Public projection of a user record. No hash, no external identity.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserProfile {
    pub id: i64,
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub nickname: Option<String>,
    pub avatar: Option<String>,
    pub user_type: Option<i32>,
    pub role: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub old_password: String,
    #[validate(length(min = 8, message = "New password must be at least 8 characters"))]
    pub new_password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_user() -> User {
        User {
            id: 1,
            username: None,
            password: None,
            email: None,
            phone: None,
            user_type: None,
            nickname: None,
            avatar_url: None,
            status: None,
            wechat_openid: None,
        }
    }

    #[test]
    fn role_mapping_covers_known_classifications() {
        assert_eq!(resolve_role(Some(1)), "ROLE_STUDENT");
        assert_eq!(resolve_role(Some(2)), "ROLE_TEACHER");
        assert_eq!(resolve_role(Some(3)), "ROLE_ADMIN");
    }

    #[test]
    fn role_mapping_is_total() {
        assert_eq!(resolve_role(None), "ROLE_USER");
        assert_eq!(resolve_role(Some(0)), "ROLE_USER");
        assert_eq!(resolve_role(Some(42)), "ROLE_USER");
        assert_eq!(resolve_role(Some(-1)), "ROLE_USER");
    }

    #[test]
    fn status_zero_or_null_is_active() {
        let mut user = bare_user();
        assert!(!user.is_disabled());
        user.status = Some(0);
        assert!(!user.is_disabled());
        user.status = Some(1);
        assert!(user.is_disabled());
    }

    #[test]
    fn login_subject_prefers_username() {
        let mut user = bare_user();
        user.wechat_openid = Some("openid-1".into());
        assert_eq!(user.login_subject(), Some("openid-1"));
        user.phone = Some("13800000000".into());
        assert_eq!(user.login_subject(), Some("13800000000"));
        user.email = Some("a@b.com".into());
        assert_eq!(user.login_subject(), Some("a@b.com"));
        user.username = Some("alice".into());
        assert_eq!(user.login_subject(), Some("alice"));
    }

    #[test]
    fn matches_identifier_checks_every_login_field() {
        let mut user = bare_user();
        user.username = Some("alice".into());
        user.email = Some("alice@example.com".into());
        assert!(user.matches_identifier("alice"));
        assert!(user.matches_identifier("alice@example.com"));
        assert!(!user.matches_identifier("bob"));
    }

    #[test]
    fn profile_carries_no_secret() {
        let mut user = bare_user();
        user.username = Some("alice".into());
        user.password = Some("$2b$12$hash".into());
        user.user_type = Some(2);
        let profile = user.profile();
        assert_eq!(profile.role, "ROLE_TEACHER");
        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("hash"));
        assert!(!json.contains("password"));
    }
}
