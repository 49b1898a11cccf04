use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::user_controller::UserController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::user_dto::UpdateUserRequest;
use crate::middleware::auth::AdminUser;
use crate::models::user::User;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{PathId, ValidatedJson};

/// Gestión de usuarios, solo administradores
pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<User>>, AppError> {
    let controller = UserController::new(&state);
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    PathId(id): PathId,
) -> Result<Json<User>, AppError> {
    let controller = UserController::new(&state);
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    PathId(id): PathId,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let controller = UserController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    PathId(id): PathId,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = UserController::new(&state);
    controller.delete(&admin, id).await?;
    Ok(Json(ApiResponse::message("User deleted".to_string())))
}
