//! Store en memoria
//!
//! Un único objeto `Store` por proceso, compartido vía `AppState`. Todas las
//! tablas viven detrás del mismo `RwLock`, así que una operación compuesta
//! (comprobar + insertar) se hace con un solo guard de escritura.

use std::collections::BTreeMap;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::{reservation::Reservation, review::Review, user::User, vehicle::Vehicle};

/// Secuencia de ids, empieza en 1
#[derive(Debug, Clone)]
pub struct Sequence {
    next: u64,
}

impl Default for Sequence {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl Sequence {
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

#[derive(Debug, Default)]
pub struct Tables {
    pub vehicles: BTreeMap<u64, Vehicle>,
    pub reservations: BTreeMap<u64, Reservation>,
    pub reviews: BTreeMap<u64, Review>,
    pub users: BTreeMap<u64, User>,
    pub vehicle_ids: Sequence,
    pub reservation_ids: Sequence,
    pub review_ids: Sequence,
    pub user_ids: Sequence,
}

#[derive(Debug, Default)]
pub struct Store {
    tables: RwLock<Tables>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_starts_at_one() {
        let mut seq = Sequence::default();
        assert_eq!(seq.next_id(), 1);
        assert_eq!(seq.next_id(), 2);
    }

    #[tokio::test]
    async fn test_store_starts_empty() {
        let store = Store::new();
        let tables = store.read().await;
        assert!(tables.vehicles.is_empty());
        assert!(tables.reservations.is_empty());
        assert!(tables.reviews.is_empty());
        assert!(tables.users.is_empty());
    }
}
