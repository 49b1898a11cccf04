use serde::Deserialize;
use validator::Validate;

use crate::repositories::user_repository::UserUpdate;
use crate::utils::validation::validate_not_empty;

// Request para actualizar un usuario (admin)
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom = "validate_not_empty", length(max = 80))]
    pub first_name: Option<String>,
    #[validate(custom = "validate_not_empty", length(max = 80))]
    pub last_name: Option<String>,
    pub is_admin: Option<bool>,
}

impl From<UpdateUserRequest> for UserUpdate {
    fn from(request: UpdateUserRequest) -> Self {
        UserUpdate {
            email: request.email.map(|e| e.trim().to_string()),
            first_name: request.first_name,
            last_name: request.last_name,
            is_admin: request.is_admin,
        }
    }
}
