use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use core_crud::CrudError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("User already exists")]
    AlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error(transparent)]
    Crud(#[from] CrudError),
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => AppError::NotFound(format!("User {} not found", id)),
            UserError::AlreadyExists => AppError::BadRequest("User already exists".to_string()),
            UserError::InvalidCredentials => {
                AppError::Unauthorized("Invalid credentials".to_string())
            }
            UserError::PasswordHash(msg) | UserError::Token(msg) => {
                tracing::error!("Credential processing failed: {}", msg);
                AppError::InternalServerError("Failed to process credentials".to_string())
            }
            UserError::Crud(CrudError::NotFound { id, .. }) => {
                AppError::NotFound(format!("User {} not found", id))
            }
            UserError::Crud(CrudError::Database(e)) => AppError::Database(e),
            UserError::Crud(CrudError::Query(msg)) => AppError::BadRequest(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_already_exists_is_bad_request_with_message() {
        let response = UserError::AlreadyExists.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "User already exists");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            UserError::InvalidCredentials.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            UserError::NotFound(Uuid::nil()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            UserError::Token("boom".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_rejected_query_is_bad_request() {
        let err = UserError::Crud(CrudError::Query("cannot sort user by 'password'".into()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
