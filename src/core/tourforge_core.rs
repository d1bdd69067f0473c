//! Core infrastructure shared between the editing library and the web
//! interface.

use crate::config::Config;
use crate::core::services::TourService;
use crate::data::{Database, TourStore};

/// Core infrastructure for tourforge.
///
/// Owns the foundational components: configuration, the database connection,
/// and the DAO store for persisted tours. When the database cannot be opened
/// the core still comes up, with store accessors returning None.
pub struct TourforgeCore {
    /// Application configuration
    config: Config,
    /// Database connection (owned to keep connection alive)
    _database: Option<Database>,
    /// Tour DAO
    tour_store: Option<TourStore>,
}

impl TourforgeCore {
    /// Create a new TourforgeCore with the given configuration, opening the
    /// database in its default location.
    pub fn new(config: Config) -> Self {
        let (database, tour_store) = match Database::open_default() {
            Ok(db) => {
                let store = TourStore::new(db.connection());
                (Some(db), Some(store))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to open database");
                (None, None)
            }
        };

        Self {
            config,
            _database: database,
            tour_store,
        }
    }

    /// Create a core over an already-open database (used by tests and by
    /// embedders that manage their own storage location).
    pub fn with_database(config: Config, database: Database) -> Self {
        let store = TourStore::new(database.connection());
        Self {
            config,
            _database: Some(database),
            tour_store: Some(store),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The tour DAO, if the database is available
    pub fn tour_store(&self) -> Option<&TourStore> {
        self.tour_store.as_ref()
    }

    /// Owner-scoped tour service, if the database is available
    pub fn tours(&self) -> Option<TourService> {
        self.tour_store.clone().map(TourService::new)
    }
}
