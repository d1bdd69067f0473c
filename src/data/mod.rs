//! Data persistence layer for tourforge
//!
//! This module provides the tour/step data model and SQLite-based storage
//! for tours.

mod database;
mod migrations;
mod models;
mod tour_store;

pub use database::{Database, DatabaseError};
pub use models::{Analytics, PersistableTour, Step, Tour, TourId};
pub use tour_store::TourStore;
