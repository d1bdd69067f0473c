//! Tour persistence service over the SQLite store.

use chrono::Utc;

use super::{PersistenceService, ServiceError};
use crate::data::{PersistableTour, Tour, TourId, TourStore};
use crate::identity::UserId;

/// Owner-scoped tour CRUD backed by [`TourStore`].
#[derive(Clone)]
pub struct TourService {
    store: TourStore,
}

impl TourService {
    pub fn new(store: TourStore) -> Self {
        Self { store }
    }

    /// All public tours, regardless of owner.
    pub fn list_public(&self) -> Result<Vec<Tour>, ServiceError> {
        self.store
            .get_public()
            .map_err(|e| ServiceError::Internal(format!("Failed to list public tours: {}", e)))
    }

    fn create(&self, owner: &UserId, payload: PersistableTour) -> Result<Tour, ServiceError> {
        let tour = Tour {
            id: TourId::generate(),
            title: payload.title,
            steps: payload.steps,
            analytics: payload.analytics,
            is_public: payload.is_public,
            created_at: Utc::now(),
            owner_id: Some(owner.clone()),
        };

        self.store
            .insert(&tour)
            .map_err(|e| ServiceError::Internal(format!("Failed to create tour: {}", e)))?;

        tracing::debug!(tour_id = %tour.id, owner = %owner, "Created tour");
        Ok(tour)
    }

    fn update(
        &self,
        owner: &UserId,
        id: TourId,
        payload: PersistableTour,
    ) -> Result<Tour, ServiceError> {
        let tour = Tour {
            id: id.clone(),
            title: payload.title,
            steps: payload.steps,
            analytics: payload.analytics,
            is_public: payload.is_public,
            // Placeholder; the stored row keeps its original creation time
            created_at: Utc::now(),
            owner_id: Some(owner.clone()),
        };

        let matched = self
            .store
            .update(&tour, owner)
            .map_err(|e| ServiceError::Internal(format!("Failed to update tour: {}", e)))?;

        if !matched {
            return Err(ServiceError::NotFound(format!("Tour {} not found", id)));
        }

        // Re-read so the caller gets the canonical row (original created_at)
        self.store
            .get_by_id(&id)
            .map_err(|e| ServiceError::Internal(format!("Failed to reload tour: {}", e)))?
            .ok_or_else(|| ServiceError::NotFound(format!("Tour {} not found", id)))
    }
}

impl PersistenceService for TourService {
    fn save(&self, owner: &UserId, tour: PersistableTour) -> Result<Tour, ServiceError> {
        match tour.id.clone() {
            None => self.create(owner, tour),
            Some(id) => self.update(owner, id, tour),
        }
    }

    fn list(&self, owner: &UserId) -> Result<Vec<Tour>, ServiceError> {
        self.store
            .get_by_owner(owner)
            .map_err(|e| ServiceError::Internal(format!("Failed to list tours: {}", e)))
    }

    fn delete(&self, id: &TourId, owner: &UserId) -> Result<bool, ServiceError> {
        self.store
            .delete(id, owner)
            .map_err(|e| ServiceError::Internal(format!("Failed to delete tour: {}", e)))
    }
}
