//! Identity/session seam
//!
//! Authentication is an opaque precondition for the editing core: all it
//! ever asks is "who is the current user, if anyone". The web layer has its
//! own header-based placeholder (see `web::auth`); this trait serves the
//! client-side catalog and tests.

use serde::{Deserialize, Serialize};

/// Opaque identifier for a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Supplies the current user, if a session is active.
pub trait IdentityProvider {
    fn current_user(&self) -> Option<UserId>;
}

/// Simulated login state.
///
/// Stands in for a real identity provider: any credentials "succeed" and
/// yield a fixed user id, matching the source application's simulated auth.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    user: Option<UserId>,
}

impl StaticIdentity {
    /// The user id every simulated login resolves to
    pub const MOCK_USER: &'static str = "mock-user-123";

    /// Start signed out
    pub fn new() -> Self {
        Self::default()
    }

    /// Start signed in as the simulated user
    pub fn signed_in() -> Self {
        Self {
            user: Some(UserId::from(Self::MOCK_USER)),
        }
    }

    /// Simulate a successful login/signup
    pub fn log_in(&mut self) -> &UserId {
        self.user.get_or_insert_with(|| UserId::from(Self::MOCK_USER))
    }

    pub fn log_out(&mut self) {
        self.user = None;
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<UserId> {
        self.user.clone()
    }
}
