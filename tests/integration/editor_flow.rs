//! Integration tests for the tour editing lifecycle
//!
//! Exercises the catalog → editor session → playback → save loop end to end,
//! including the simulated recording flow and its teardown guarantees.

use std::time::Duration;

use tourforge::{
    Advance, Analytics, EditorOptions, EditorSession, TourCatalog, TourId,
};

fn fast_options() -> EditorOptions {
    EditorOptions {
        recording_delay: Duration::from_millis(10),
    }
}

#[tokio::test]
async fn test_edit_and_save_existing_tour() {
    let mut catalog = TourCatalog::with_sample_tours();
    let id = TourId::from("tour-1");

    let mut session = catalog.edit(&id, fast_options()).unwrap();
    session.set_title("Getting Started, revised");
    session.add_step();

    let saved = session.save().unwrap();
    catalog.upsert(saved);

    // Replaced in place, identity and counters intact
    let tour = &catalog.list()[0];
    assert_eq!(tour.id, id);
    assert_eq!(tour.title, "Getting Started, revised");
    assert_eq!(tour.steps.len(), 4);
    assert_eq!(tour.analytics, Analytics { views: 15, shares: 3 });
    assert!(tour.is_public);
    assert_eq!(catalog.total_views(), 23);
}

#[tokio::test]
async fn test_create_flow_with_recording() {
    let mut catalog = TourCatalog::with_sample_tours();

    let mut session = EditorSession::open(None, fast_options());
    session.set_title("Recorded walkthrough");
    session.start_recording().unwrap();
    assert!(session.is_recording());

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!session.is_recording());
    assert_eq!(session.step_count(), 1);

    let saved = session.save().unwrap();
    assert_eq!(saved.analytics, Analytics::default());
    assert!(!saved.is_public);

    catalog.upsert(saved);
    assert_eq!(catalog.len(), 3);
}

#[tokio::test]
async fn test_preview_walkthrough_over_sample_tour() {
    let catalog = TourCatalog::with_sample_tours();
    let mut session = catalog
        .edit(&TourId::from("tour-1"), fast_options())
        .unwrap();

    let mut cursor = session.start_preview().unwrap();
    assert_eq!(cursor.len(), 3);
    assert!(cursor.is_first());

    assert_eq!(cursor.next(), Advance::Moved);
    assert_eq!(cursor.next(), Advance::Moved);
    assert!(cursor.is_last());
    assert_eq!(cursor.next(), Advance::Completed);
    assert_eq!(cursor.position(), 2);

    cursor.prev();
    cursor.prev();
    cursor.prev();
    assert_eq!(cursor.position(), 0);

    session.end_preview();
    assert!(session.save().is_ok());
}

#[tokio::test]
async fn test_severed_recording_never_reaches_the_catalog() {
    let mut catalog = TourCatalog::new();

    let mut session = EditorSession::open(None, fast_options());
    session.set_title("Cut short");
    session.add_step();
    session.start_recording().unwrap();

    // Save before the deferred completion fires
    let saved = session.save().unwrap();
    catalog.upsert(saved);
    drop(session);

    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(catalog.list()[0].steps.len(), 1);
}
