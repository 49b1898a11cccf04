use std::sync::Arc;

use crate::database::Store;
use crate::models::user::{NewUser, User};
use crate::utils::errors::{conflict_error, not_found_error, AppError};

/// Cambios parciales sobre un usuario
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_admin: Option<bool>,
}

pub struct UserRepository {
    store: Arc<Store>,
}

impl UserRepository {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Username y email son únicos (sin distinguir mayúsculas)
    pub async fn create(&self, new: NewUser) -> Result<User, AppError> {
        let mut tables = self.store.write().await;

        if tables
            .users
            .values()
            .any(|u| u.username.eq_ignore_ascii_case(&new.username))
        {
            return Err(conflict_error("User", "username", &new.username));
        }
        if tables
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&new.email))
        {
            return Err(conflict_error("User", "email", &new.email));
        }

        let id = tables.user_ids.next_id();
        let user = User::from_new(id, new);
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    pub async fn find_by_id(&self, id: u64) -> Result<Option<User>, AppError> {
        let tables = self.store.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let tables = self.store.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        let tables = self.store.read().await;
        Ok(tables.users.values().cloned().collect())
    }

    pub async fn update(&self, id: u64, changes: UserUpdate) -> Result<User, AppError> {
        let mut tables = self.store.write().await;

        if let Some(email) = &changes.email {
            if tables
                .users
                .values()
                .any(|u| u.id != id && u.email.eq_ignore_ascii_case(email))
            {
                return Err(conflict_error("User", "email", email));
            }
        }

        let user = tables
            .users
            .get_mut(&id)
            .ok_or_else(|| not_found_error("User", id))?;

        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(first_name) = changes.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            user.last_name = last_name;
        }
        if let Some(is_admin) = changes.is_admin {
            user.is_admin = is_admin;
        }
        Ok(user.clone())
    }

    pub async fn delete(&self, id: u64) -> Result<User, AppError> {
        let mut tables = self.store.write().await;
        tables
            .users
            .remove(&id)
            .ok_or_else(|| not_found_error("User", id))
    }

    pub async fn count(&self) -> Result<usize, AppError> {
        Ok(self.store.read().await.users.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: "hash".to_string(),
            email: email.to_string(),
            first_name: "Ana".to_string(),
            last_name: "García".to_string(),
            is_admin: false,
        }
    }

    #[tokio::test]
    async fn test_unique_username_and_email() {
        let repo = UserRepository::new(Arc::new(Store::new()));
        repo.create(new_user("ana", "ana@example.com")).await.unwrap();

        let dup_name = repo.create(new_user("ANA", "other@example.com")).await;
        assert!(matches!(dup_name, Err(AppError::Conflict(_))));

        let dup_mail = repo.create(new_user("ana2", "Ana@Example.com")).await;
        assert!(matches!(dup_mail, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = UserRepository::new(Arc::new(Store::new()));
        let user = repo.create(new_user("luis", "luis@example.com")).await.unwrap();

        let updated = repo
            .update(
                user.id,
                UserUpdate {
                    is_admin: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.is_admin);
        assert_eq!(updated.email, "luis@example.com");

        assert!(repo.find_by_username("LUIS").await.unwrap().is_some());
        repo.delete(user.id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(matches!(repo.delete(user.id).await, Err(AppError::NotFound(_))));
    }
}
