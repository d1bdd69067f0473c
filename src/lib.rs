pub mod catalog;
pub mod config;
pub mod core;
pub mod data;
pub mod editor;
pub mod identity;
pub mod player;
pub mod util;
pub mod web;

pub use catalog::TourCatalog;
pub use config::Config;
pub use crate::core::services::{PersistenceService, ServiceError, TourService};
pub use crate::core::TourforgeCore;
pub use data::{Analytics, Database, PersistableTour, Step, Tour, TourId, TourStore};
pub use editor::{EditorError, EditorMode, EditorOptions, EditorSession};
pub use identity::{IdentityProvider, StaticIdentity, UserId};
pub use player::{Advance, PlaybackCursor, PlayerError};
pub use web::{run_server, ServerConfig, WebAppState};
