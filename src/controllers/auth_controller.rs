use tracing::info;

use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::User;
use crate::repositories::user_repository::UserRepository;
use crate::services::auth_service::{AuthService, Registration};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct AuthController {
    service: AuthService,
    users: UserRepository,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: AuthService::new(state),
            users: UserRepository::new(state.store.clone()),
        }
    }

    /// Alta pública; nunca crea administradores
    pub async fn register(&self, request: RegisterRequest) -> Result<User, AppError> {
        let user = self
            .service
            .register(Registration {
                username: request.username.trim().to_string(),
                password: request.password,
                email: request.email.trim().to_string(),
                first_name: request.first_name.trim().to_string(),
                last_name: request.last_name.trim().to_string(),
                is_admin: false,
            })
            .await?;

        info!("👤 Usuario registrado: {} ({})", user.username, user.id);
        Ok(user)
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AppError> {
        let outcome = self
            .service
            .login(request.username.trim(), &request.password)
            .await
            .map_err(|e| {
                tracing::warn!("🔒 Login fallido para '{}'", request.username);
                e
            })?;

        info!("🔑 Login: {}", outcome.user.username);
        Ok(LoginResponse {
            token: outcome.token,
            expires_at: outcome.session.expires_at,
            user: outcome.user,
        })
    }

    pub async fn logout(&self, user: &AuthenticatedUser) -> bool {
        let revoked = self.service.logout(&user.session).await;
        info!("👋 Logout: {}", user.username);
        revoked
    }

    pub async fn me(&self, user: &AuthenticatedUser) -> Result<User, AppError> {
        self.users
            .find_by_id(user.user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))
    }
}
