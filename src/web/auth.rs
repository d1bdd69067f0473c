//! Placeholder auth middleware.
//!
//! Token-less by design, matching the source system: the caller asserts its
//! identity through a header and every assertion is trusted. Routes that
//! extract [`CurrentUser`] reject requests without the header; nothing else
//! is checked.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::error::WebError;
use crate::identity::UserId;

/// Header carrying the asserted user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated user for a request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserId);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                WebError::Unauthorized(format!("Missing {} header", USER_ID_HEADER))
            })?;

        Ok(CurrentUser(UserId::from(user)))
    }
}
