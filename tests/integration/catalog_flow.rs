//! Integration tests for catalog/persistence round trips
//!
//! Tests the full workflow of authoring tours in editor sessions and moving
//! them through the persistence collaborator at session boundaries.

use std::time::Duration;

use tempfile::TempDir;
use tourforge::{
    Database, EditorOptions, EditorSession, IdentityProvider, PersistenceService, ServiceError,
    StaticIdentity, TourCatalog, TourService, TourStore,
};

/// Create a test database in a temporary directory with a tour service
fn create_test_service() -> (Database, TourService, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db = Database::open(dir.path().join("test.db")).expect("Failed to open database");
    let service = TourService::new(TourStore::new(db.connection()));
    (db, service, dir)
}

fn fast_options() -> EditorOptions {
    EditorOptions {
        recording_delay: Duration::from_millis(10),
    }
}

#[tokio::test]
async fn test_full_publishing_cycle() {
    let (_db, service, _dir) = create_test_service();
    let identity = StaticIdentity::signed_in();
    let owner = identity.current_user().unwrap();

    // Author a new tour and push it through the create path
    let mut catalog = TourCatalog::new();
    let mut session = EditorSession::open(None, fast_options());
    session.set_title("Demo");
    session.add_step();
    session.add_step();

    let authored = session.save().unwrap();
    let created = catalog.persist(&service, &owner, authored).unwrap();
    assert_eq!(catalog.len(), 1);

    // A fresh catalog sees the persisted tour
    let mut reloaded = TourCatalog::new();
    reloaded.load(&service, &owner).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.list()[0].title, "Demo");
    assert_eq!(reloaded.list()[0].steps.len(), 2);

    // Edit the reloaded copy and push it through the update path
    let mut session = reloaded.edit(&created.id, fast_options()).unwrap();
    session.set_title("Demo, take two");
    let edited = session.save().unwrap();
    let updated = reloaded.persist(&service, &owner, edited).unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(reloaded.len(), 1);

    // Delete reports the match, then the miss
    assert!(reloaded.delete(&service, &owner, &created.id).unwrap());
    assert!(reloaded.is_empty());
    assert!(!reloaded.delete(&service, &owner, &created.id).unwrap());
}

#[tokio::test]
async fn test_update_of_unpersisted_tour_is_reported() {
    let (_db, service, _dir) = create_test_service();
    let owner = StaticIdentity::signed_in().current_user().unwrap();

    // Fixture tours exist client-side but were never persisted; the
    // collaborator reports the miss instead of quietly creating them.
    let mut catalog = TourCatalog::with_sample_tours();
    let fixture = catalog.list()[0].clone();

    match catalog.persist(&service, &owner, fixture) {
        Err(ServiceError::NotFound(_)) => {}
        other => panic!("expected NotFound, got {:?}", other.map(|t| t.title)),
    }
}

#[tokio::test]
async fn test_owners_are_isolated() {
    let (_db, service, _dir) = create_test_service();
    let alice = tourforge::UserId::from("alice");
    let bob = tourforge::UserId::from("bob");

    let mut catalog = TourCatalog::new();
    let mut session = EditorSession::open(None, fast_options());
    session.set_title("Alice's tour");
    let saved = catalog.persist(&service, &alice, session.save().unwrap()).unwrap();

    assert_eq!(service.list(&alice).unwrap().len(), 1);
    assert!(service.list(&bob).unwrap().is_empty());

    // Bob cannot delete what he does not own; the tour survives
    assert!(!service.delete(&saved.id, &bob).unwrap());
    assert_eq!(service.list(&alice).unwrap().len(), 1);
}
