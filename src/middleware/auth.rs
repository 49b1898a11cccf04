//! Autenticación de requests
//!
//! Extractores que resuelven el usuario de sesión a partir del token
//! (cookie `session` o cabecera `Authorization: Bearer`). El flag de admin se
//! lee del usuario en el store, no del token, para que un cambio de rol tenga
//! efecto inmediato.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::{
    repositories::user_repository::UserRepository,
    state::{AppState, Session},
    utils::{
        errors::AppError,
        jwt::{extract_token_from_cookie, extract_token_from_header, verify_token},
    },
};

/// Usuario autenticado que se inyecta en los handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: u64,
    pub username: String,
    pub is_admin: bool,
    pub session: Session,
}

impl AuthenticatedUser {
    /// El usuario es dueño del recurso o es admin
    pub fn can_access(&self, owner_id: u64) -> bool {
        self.is_admin || self.user_id == owner_id
    }
}

/// Usuario autenticado con permisos de administrador
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthenticatedUser);

fn token_from_parts(parts: &Parts) -> Result<String, AppError> {
    if let Some(auth_header) = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
    {
        return extract_token_from_header(auth_header).map(str::to_string);
    }

    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(extract_token_from_cookie)
        .map(str::to_string)
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
}

/// Resolver token → sesión vigente → usuario existente
pub async fn authenticate_token(token: &str, state: &AppState) -> Result<AuthenticatedUser, AppError> {
    let claims = verify_token(token, &state.jwt_config())?;
    let session_id = claims.session_id()?;

    let session = state
        .get_session(&session_id)
        .await
        .ok_or_else(|| AppError::Unauthorized("Session expired or revoked".to_string()))?;

    if session.user_id != claims.user_id()? {
        return Err(AppError::Unauthorized("Session does not match token".to_string()));
    }

    let user = UserRepository::new(state.store.clone())
        .find_by_id(session.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))?;

    Ok(AuthenticatedUser {
        user_id: user.id,
        username: user.username,
        is_admin: user.is_admin,
        session,
    })
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(user.clone());
        }

        let token = token_from_parts(parts)?;
        let user = authenticate_token(&token, state).await?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            return Err(AppError::Forbidden(
                "Administrator privileges required".to_string(),
            ));
        }
        Ok(AdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnvironmentConfig;
    use crate::database::Store;
    use crate::services::auth_service::{AuthService, Registration};
    use axum::http::Request;
    use std::sync::Arc;

    async fn state_with_user(is_admin: bool) -> (AppState, String) {
        let config = EnvironmentConfig {
            bcrypt_cost: 4,
            ..Default::default()
        };
        let state = AppState::new(config, Arc::new(Store::new()));
        let auth = AuthService::new(&state);
        auth.register(Registration {
            username: "eva".to_string(),
            password: "password1".to_string(),
            email: "eva@example.com".to_string(),
            first_name: "Eva".to_string(),
            last_name: "Ruiz".to_string(),
            is_admin,
        })
        .await
        .unwrap();
        let outcome = auth.login("eva", "password1").await.unwrap();
        (state, outcome.token)
    }

    fn parts_with(header_name: header::HeaderName, value: &str) -> Parts {
        let (parts, _) = Request::builder()
            .header(header_name, value)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[tokio::test]
    async fn test_bearer_and_cookie_tokens() {
        let (state, token) = state_with_user(false).await;

        let mut parts = parts_with(header::AUTHORIZATION, &format!("Bearer {}", token));
        let user = AuthenticatedUser::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(user.username, "eva");

        let mut parts = parts_with(header::COOKIE, &format!("session={}", token));
        let user = AuthenticatedUser::from_request_parts(&mut parts, &state).await.unwrap();
        assert!(!user.is_admin);
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let (state, _) = state_with_user(false).await;
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();
        let result = AuthenticatedUser::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_admin_gate() {
        let (state, token) = state_with_user(false).await;
        let mut parts = parts_with(header::AUTHORIZATION, &format!("Bearer {}", token));
        let result = AdminUser::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));

        let (state, token) = state_with_user(true).await;
        let mut parts = parts_with(header::AUTHORIZATION, &format!("Bearer {}", token));
        assert!(AdminUser::from_request_parts(&mut parts, &state).await.is_ok());
    }

    #[tokio::test]
    async fn test_revoked_session_is_rejected() {
        let (state, token) = state_with_user(false).await;
        let claims = verify_token(&token, &state.jwt_config()).unwrap();
        state.revoke_session(&claims.session_id().unwrap()).await;

        let mut parts = parts_with(header::AUTHORIZATION, &format!("Bearer {}", token));
        let result = AuthenticatedUser::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }
}
