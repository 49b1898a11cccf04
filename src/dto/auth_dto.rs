use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::User;
use crate::utils::validation::{validate_not_empty, USERNAME_RE};

// Register request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(regex = "USERNAME_RE")]
    pub username: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom = "validate_not_empty", length(max = 80))]
    pub first_name: String,
    #[validate(custom = "validate_not_empty", length(max = 80))]
    pub last_name: String,
}

// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom = "validate_not_empty")]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

// Login response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_validation() {
        let request: RegisterRequest = serde_json::from_value(json!({
            "username": "maria.lopez",
            "password": "long-enough",
            "email": "maria@example.com",
            "firstName": "María",
            "lastName": "López"
        }))
        .unwrap();
        assert!(request.validate().is_ok());

        let request: RegisterRequest = serde_json::from_value(json!({
            "username": "x",
            "password": "short",
            "email": "not-an-email",
            "firstName": "",
            "lastName": "López"
        }))
        .unwrap();
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["username", "password", "email", "first_name"] {
            assert!(fields.contains_key(field), "missing error for {}", field);
        }
    }
}
