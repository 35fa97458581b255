//! Caller identity extraction.
//!
//! Session auth lives outside this service; the gateway in front is
//! expected to resolve the session and set `x-user-id` on every request.

use crate::error::ApiError;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use engagement::UserId;

/// The authenticated user, taken from the `x-user-id` header.
pub struct UserIdentity(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for UserIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-user-id")
            .ok_or_else(|| ApiError::InvalidInput("missing x-user-id header".to_string()))?;

        header
            .to_str()
            .ok()
            .and_then(|v| v.parse().ok())
            .map(UserIdentity)
            .ok_or_else(|| {
                ApiError::InvalidInput("x-user-id must be a numeric user id".to_string())
            })
    }
}
