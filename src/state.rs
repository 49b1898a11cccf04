//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum: configuración, store en memoria y sesiones.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::environment::EnvironmentConfig;
use crate::database::Store;
use crate::services::availability_service::AvailabilityChecker;
use crate::services::pricing_service::PricingCalculator;
use crate::utils::jwt::{expiry_after, JwtConfig};

/// Sesión de usuario del lado servidor
#[derive(Clone, Debug)]
pub struct Session {
    pub id: Uuid,
    pub user_id: u64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: u64, expires_in_secs: u64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            created_at: now,
            expires_at: expiry_after(now, expires_in_secs),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub store: Arc<Store>,
    pub sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, store: Arc<Store>) -> Self {
        Self {
            config,
            store,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig::from(&self.config)
    }

    pub fn pricing(&self) -> PricingCalculator {
        PricingCalculator::new(self.config.tax_rate())
    }

    pub fn availability(&self) -> AvailabilityChecker {
        AvailabilityChecker::new(self.config.availability_policy())
    }

    /// Obtener una sesión vigente
    pub async fn get_session(&self, session_id: &Uuid) -> Option<Session> {
        let sessions = self.sessions.read().await;
        sessions
            .get(session_id)
            .filter(|session| !session.is_expired())
            .cloned()
    }

    /// Almacenar sesión
    pub async fn store_session(&self, session: Session) {
        let mut sessions = self.sessions.write().await;
        log::debug!("session {} stored for user {}", session.id, session.user_id);
        sessions.insert(session.id, session);
    }

    /// Revocar sesión (logout)
    pub async fn revoke_session(&self, session_id: &Uuid) -> bool {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id).is_some()
    }

    /// Revocar todas las sesiones de un usuario
    pub async fn revoke_user_sessions(&self, user_id: u64) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.user_id != user_id);
        before - sessions.len()
    }

    /// Limpiar sesiones expiradas
    pub async fn cleanup_expired_sessions(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired());
        before - sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(EnvironmentConfig::default(), Arc::new(Store::new()))
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let state = state();
        let session = Session::new(7, 3600);
        let id = session.id;

        state.store_session(session).await;
        assert_eq!(state.get_session(&id).await.unwrap().user_id, 7);

        assert!(state.revoke_session(&id).await);
        assert!(state.get_session(&id).await.is_none());
        assert!(!state.revoke_session(&id).await);
    }

    #[tokio::test]
    async fn test_expired_sessions_are_ignored_and_cleaned() {
        let state = state();
        let mut session = Session::new(1, 3600);
        session.expires_at = Utc::now() - chrono::Duration::seconds(1);
        let id = session.id;
        state.store_session(session).await;

        assert!(state.get_session(&id).await.is_none());
        assert_eq!(state.cleanup_expired_sessions().await, 1);
    }

    #[test]
    fn test_huge_lifetime_does_not_overflow() {
        let session = Session::new(1, 100_000_000_000_000_000);
        assert!(!session.is_expired());
        assert_eq!(session.expires_at, DateTime::<Utc>::MAX_UTC);
    }

    #[tokio::test]
    async fn test_revoke_user_sessions() {
        let state = state();
        state.store_session(Session::new(1, 60)).await;
        state.store_session(Session::new(1, 60)).await;
        state.store_session(Session::new(2, 60)).await;
        assert_eq!(state.revoke_user_sessions(1).await, 2);
        assert_eq!(state.sessions.read().await.len(), 1);
    }
}
