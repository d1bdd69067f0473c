//! Core module containing shared infrastructure for tourforge.
//!
//! This module provides the components used by both the editing library and
//! the web interface:
//! - Database access and the tour DAO store
//! - The persistence collaborator contract and its SQLite implementation
//! - Configuration

pub mod services;
mod tourforge_core;

pub use tourforge_core::TourforgeCore;
