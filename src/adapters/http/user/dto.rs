//! Account DTOs. The password hash never leaves the server.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::user::User;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            is_admin: user.is_admin(),
            created_at: *user.created_at(),
            updated_at: *user.updated_at(),
        }
    }
}

/// Every field is optional; password fields must come together.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub old_password: Option<String>,
    pub new_password: Option<String>,
    pub new_password_confirm: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{Email, UserName};

    #[test]
    fn response_omits_password_hash() {
        let user = User::register(
            UserName::parse("Alice").unwrap(),
            Email::parse("alice@example.com").unwrap(),
            "$argon2id$v=19$secret".to_string(),
        );
        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();

        assert_eq!(json["email"], "alice@example.com");
        assert_eq!(json["isAdmin"], false);
        assert!(!json.to_string().contains("argon2"));
    }

    #[test]
    fn update_request_reads_camel_case_password_fields() {
        let req: UpdateUserRequest = serde_json::from_str(
            r#"{"oldPassword":"a","newPassword":"b","newPasswordConfirm":"b"}"#,
        )
        .unwrap();
        assert_eq!(req.old_password.as_deref(), Some("a"));
        assert_eq!(req.new_password_confirm.as_deref(), Some("b"));
        assert!(req.name.is_none());
    }
}
