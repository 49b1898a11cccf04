use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest};
use crate::dto::common_dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::User;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{clear_session_cookie, session_cookie};
use crate::utils::validation::ValidatedJson;

/// Configura las rutas de autenticación
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), AppError> {
    let controller = AuthController::new(&state);
    let user = controller.register(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            user,
            "Registration successful".to_string(),
        )),
    ))
}

/// Login: devuelve el token y además lo deja en la cookie `session`
async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let controller = AuthController::new(&state);
    let response: LoginResponse = controller.login(&request).await?;
    let cookie = session_cookie(&response.token, state.config.jwt_expiration);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::success(response)),
    ))
}

async fn logout(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> impl IntoResponse {
    let controller = AuthController::new(&state);
    controller.logout(&user).await;

    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(ApiResponse::message("Logout successful".to_string())),
    )
}

async fn me(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<User>, AppError> {
    let controller = AuthController::new(&state);
    let response = controller.me(&user).await?;
    Ok(Json(response))
}
