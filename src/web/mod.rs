//! Web interface for tourforge
//!
//! REST backend persisting tours per user, with token-less placeholder auth.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::WebError;
pub use server::{run_server, ServerConfig};
pub use state::WebAppState;
