//! Service layer: collaborator contracts and their implementations.

mod error;
mod tour_service;

pub use error::ServiceError;
pub use tour_service::TourService;

use crate::data::{PersistableTour, Tour, TourId};
use crate::identity::UserId;

/// The persistence collaborator the editing core depends on.
///
/// `save` creates when the payload carries no id and updates when it does;
/// updates are last-write-wins scoped by owner and idempotent on retry.
pub trait PersistenceService {
    fn save(&self, owner: &UserId, tour: PersistableTour) -> Result<Tour, ServiceError>;
    fn list(&self, owner: &UserId) -> Result<Vec<Tour>, ServiceError>;
    fn delete(&self, id: &TourId, owner: &UserId) -> Result<bool, ServiceError>;
}
