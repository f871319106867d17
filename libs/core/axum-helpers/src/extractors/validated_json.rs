//! Body extractor: deserialize, then run `Validate`.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Rejects malformed JSON with the `Json` rejection status and failed
/// validation with `400 VALIDATION_ERROR`, field errors under `details`.
///
/// ```ignore
/// async fn create(ValidatedJson(dto): ValidatedJson<CreateRoleDto>) -> impl IntoResponse { .. }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let payload = match Json::<T>::from_request(req, state).await {
            Ok(Json(payload)) => payload,
            Err(rejection) => return Err(AppError::JsonExtractorRejection(rejection).into_response()),
        };

        if let Err(errors) = payload.validate() {
            return Err(AppError::ValidationError(errors).into_response());
        }
        Ok(Self(payload))
    }
}
