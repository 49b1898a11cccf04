//! Servicio de autenticación
//!
//! Registro, login y logout. Las contraseñas se guardan con bcrypt; el hash
//! se calcula en el pool bloqueante de tokio.

use crate::models::user::{NewUser, User};
use crate::repositories::user_repository::UserRepository;
use crate::state::{AppState, Session};
use crate::utils::errors::{internal_error, AppError};
use crate::utils::jwt::generate_token;

/// Hash bcrypt de una contraseña
pub async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| internal_error(&format!("hashing task failed: {}", e)))?
        .map_err(AppError::from)
}

/// Verificar contraseña contra un hash bcrypt
pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| internal_error(&format!("verify task failed: {}", e)))?
        .map_err(AppError::from)
}

/// Datos de alta de un usuario
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
}

/// Resultado de un login correcto
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub token: String,
    pub session: Session,
}

pub struct AuthService {
    state: AppState,
    users: UserRepository,
}

impl AuthService {
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
            users: UserRepository::new(state.store.clone()),
        }
    }

    pub async fn register(&self, registration: Registration) -> Result<User, AppError> {
        let password_hash =
            hash_password(registration.password, self.state.config.bcrypt_cost).await?;

        self.users
            .create(NewUser {
                username: registration.username,
                password_hash,
                email: registration.email,
                first_name: registration.first_name,
                last_name: registration.last_name,
                is_admin: registration.is_admin,
            })
            .await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        let valid = verify_password(password.to_string(), user.password_hash.clone()).await?;
        if !valid {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let session = Session::new(user.id, self.state.config.jwt_expiration);
        let token = generate_token(user.id, session.id, user.is_admin, &self.state.jwt_config())?;
        self.state.store_session(session.clone()).await;

        Ok(LoginOutcome {
            user,
            token,
            session,
        })
    }

    pub async fn logout(&self, session: &Session) -> bool {
        self.state.revoke_session(&session.id).await
    }
}
