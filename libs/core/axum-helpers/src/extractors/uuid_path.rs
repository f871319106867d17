//! `{id}` path segment parsed as a UUID.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// Unlike `Path<Uuid>`, a malformed id yields `400 INVALID_UUID` in the
/// shared error envelope.
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match Uuid::parse_str(&raw) {
            Ok(id) => Ok(Self(id)),
            Err(err) => Err(AppError::UuidError(err).into_response()),
        }
    }
}
