use tracing::info;

use crate::dto::common_dto::ApiResponse;
use crate::dto::user_dto::UpdateUserRequest;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::User;
use crate::repositories::user_repository::UserRepository;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub struct UserController {
    state: AppState,
    repository: UserRepository,
}

impl UserController {
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
            repository: UserRepository::new(state.store.clone()),
        }
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        self.repository.list().await
    }

    pub async fn get_by_id(&self, id: u64) -> Result<User, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("User", id))
    }

    pub async fn update(
        &self,
        id: u64,
        request: UpdateUserRequest,
    ) -> Result<ApiResponse<User>, AppError> {
        let user = self.repository.update(id, request.into()).await?;
        info!("✏️ Usuario {} actualizado (admin: {})", user.username, user.is_admin);

        Ok(ApiResponse::success_with_message(
            user,
            "User updated".to_string(),
        ))
    }

    /// Un admin no puede borrarse a sí mismo; las sesiones del usuario se revocan
    pub async fn delete(&self, admin: &AuthenticatedUser, id: u64) -> Result<(), AppError> {
        if admin.user_id == id {
            return Err(AppError::Conflict(
                "Administrators cannot delete their own account".to_string(),
            ));
        }

        let user = self.repository.delete(id).await?;
        let revoked = self.state.revoke_user_sessions(id).await;
        info!("🗑️ Usuario {} eliminado ({} sesiones revocadas)", user.username, revoked);
        Ok(())
    }
}
