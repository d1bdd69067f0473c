//! Tour data access object

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};
use tracing::warn;

use super::models::{Analytics, Step, Tour, TourId};
use crate::identity::UserId;

/// Data access object for tour operations
#[derive(Clone)]
pub struct TourStore {
    conn: Arc<Mutex<Connection>>,
}

impl TourStore {
    /// Create a new TourStore
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Insert a new tour. The caller is responsible for having stamped the
    /// owner; the schema rejects ownerless rows.
    pub fn insert(&self, tour: &Tour) -> SqliteResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO tours (id, owner_id, title, steps, views, shares, is_public, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                tour.id.as_str(),
                tour.owner_id.as_ref().map(|o| o.to_string()),
                tour.title,
                serialize_steps(&tour.steps),
                tour.analytics.views as i64,
                tour.analytics.shares as i64,
                if tour.is_public { 1 } else { 0 },
                tour.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Update a tour, scoped by owner (last write wins).
    ///
    /// Returns false when no row matched the id/owner pair. `created_at` is
    /// set once at insert and never rewritten.
    pub fn update(&self, tour: &Tour, owner: &UserId) -> SqliteResult<bool> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute(
            "UPDATE tours SET title = ?3, steps = ?4, views = ?5, shares = ?6, is_public = ?7
             WHERE id = ?1 AND owner_id = ?2",
            params![
                tour.id.as_str(),
                owner.as_str(),
                tour.title,
                serialize_steps(&tour.steps),
                tour.analytics.views as i64,
                tour.analytics.shares as i64,
                if tour.is_public { 1 } else { 0 },
            ],
        )?;
        Ok(affected > 0)
    }

    /// Get a tour by ID
    pub fn get_by_id(&self, id: &TourId) -> SqliteResult<Option<Tour>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, title, steps, views, shares, is_public, created_at
             FROM tours WHERE id = ?1",
        )?;

        let mut rows = stmt.query(params![id.as_str()])?;
        if let Some(row) = rows.next()? {
            Ok(Some(Self::row_to_tour(row)?))
        } else {
            Ok(None)
        }
    }

    /// Get all tours belonging to an owner
    pub fn get_by_owner(&self, owner: &UserId) -> SqliteResult<Vec<Tour>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, title, steps, views, shares, is_public, created_at
             FROM tours WHERE owner_id = ?1 ORDER BY created_at",
        )?;

        let tours = stmt
            .query_map(params![owner.as_str()], Self::row_to_tour)?
            .filter_map(|r| r.ok())
            .collect();

        Ok(tours)
    }

    /// Get all public tours
    pub fn get_public(&self) -> SqliteResult<Vec<Tour>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, title, steps, views, shares, is_public, created_at
             FROM tours WHERE is_public = 1 ORDER BY created_at",
        )?;

        let tours = stmt
            .query_map([], Self::row_to_tour)?
            .filter_map(|r| r.ok())
            .collect();

        Ok(tours)
    }

    /// Delete a tour, scoped by owner. Returns false when nothing matched.
    pub fn delete(&self, id: &TourId, owner: &UserId) -> SqliteResult<bool> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute(
            "DELETE FROM tours WHERE id = ?1 AND owner_id = ?2",
            params![id.as_str(), owner.as_str()],
        )?;
        Ok(affected > 0)
    }

    /// Convert a database row to a Tour
    fn row_to_tour(row: &rusqlite::Row) -> SqliteResult<Tour> {
        let id: String = row.get(0)?;
        let owner_id: Option<String> = row.get(1)?;
        let title: String = row.get(2)?;
        let steps_json: String = row.get(3)?;
        let views: i64 = row.get(4)?;
        let shares: i64 = row.get(5)?;
        let is_public: i64 = row.get(6)?;
        let created_at_str: String = row.get(7)?;

        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    7,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;

        Ok(Tour {
            id: TourId::from(id),
            owner_id: owner_id.map(UserId::from),
            title,
            steps: deserialize_steps(&steps_json),
            analytics: Analytics {
                views: views.max(0) as u64,
                shares: shares.max(0) as u64,
            },
            is_public: is_public != 0,
            created_at,
        })
    }
}

fn serialize_steps(steps: &[Step]) -> String {
    serde_json::to_string(steps).unwrap_or_else(|e| {
        warn!("Failed to serialize steps: {}", e);
        "[]".to_string()
    })
}

fn deserialize_steps(value: &str) -> Vec<Step> {
    serde_json::from_str::<Vec<Step>>(value).unwrap_or_else(|e| {
        warn!("Failed to deserialize steps: {}", e);
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Database;
    use tempfile::tempdir;

    fn test_store() -> (Database, TourStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("test.db")).unwrap();
        let store = TourStore::new(db.connection());
        (db, store, dir)
    }

    fn owned_tour(title: &str, owner: &UserId) -> Tour {
        let mut tour = Tour::new(title);
        tour.owner_id = Some(owner.clone());
        tour.add_step(Step::new("first", "image-1"));
        tour
    }

    #[test]
    fn test_insert_and_get_round_trip() {
        let (_db, store, _dir) = test_store();
        let owner = UserId::from("user-1");
        let tour = owned_tour("Onboarding", &owner);

        store.insert(&tour).unwrap();
        let loaded = store.get_by_id(&tour.id).unwrap().unwrap();

        assert_eq!(loaded.title, "Onboarding");
        assert_eq!(loaded.steps, tour.steps);
        assert_eq!(loaded.owner_id, Some(owner));
    }

    #[test]
    fn test_get_by_owner_excludes_other_users() {
        let (_db, store, _dir) = test_store();
        let alice = UserId::from("alice");
        let bob = UserId::from("bob");

        store.insert(&owned_tour("Alice tour", &alice)).unwrap();
        store.insert(&owned_tour("Bob tour", &bob)).unwrap();

        let tours = store.get_by_owner(&alice).unwrap();
        assert_eq!(tours.len(), 1);
        assert_eq!(tours[0].title, "Alice tour");
    }

    #[test]
    fn test_get_public_filters_private_tours() {
        let (_db, store, _dir) = test_store();
        let owner = UserId::from("user-1");

        let mut public = owned_tour("Public", &owner);
        public.is_public = true;
        store.insert(&public).unwrap();
        store.insert(&owned_tour("Private", &owner)).unwrap();

        let tours = store.get_public().unwrap();
        assert_eq!(tours.len(), 1);
        assert_eq!(tours[0].title, "Public");
    }

    #[test]
    fn test_update_scoped_by_owner() {
        let (_db, store, _dir) = test_store();
        let owner = UserId::from("user-1");
        let mut tour = owned_tour("Before", &owner);
        store.insert(&tour).unwrap();

        tour.title = "After".to_string();
        assert!(store.update(&tour, &owner).unwrap());
        assert!(!store.update(&tour, &UserId::from("someone-else")).unwrap());

        let loaded = store.get_by_id(&tour.id).unwrap().unwrap();
        assert_eq!(loaded.title, "After");
    }

    #[test]
    fn test_delete_returns_whether_a_row_matched() {
        let (_db, store, _dir) = test_store();
        let owner = UserId::from("user-1");
        let tour = owned_tour("Doomed", &owner);
        store.insert(&tour).unwrap();

        assert!(!store.delete(&tour.id, &UserId::from("intruder")).unwrap());
        assert!(store.delete(&tour.id, &owner).unwrap());
        assert!(!store.delete(&tour.id, &owner).unwrap());
    }
}
