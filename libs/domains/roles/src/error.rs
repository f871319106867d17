use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use core_crud::CrudError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum RoleError {
    #[error("Role not found: {0}")]
    NotFound(Uuid),

    #[error(transparent)]
    Crud(#[from] CrudError),
}

pub type RoleResult<T> = Result<T, RoleError>;

impl From<RoleError> for AppError {
    fn from(err: RoleError) -> Self {
        match err {
            RoleError::NotFound(id) => AppError::NotFound(format!("Role {} not found", id)),
            RoleError::Crud(CrudError::NotFound { id, .. }) => {
                AppError::NotFound(format!("Role {} not found", id))
            }
            RoleError::Crud(CrudError::Database(e)) => AppError::Database(e),
            RoleError::Crud(CrudError::Query(msg)) => AppError::BadRequest(msg),
        }
    }
}

impl IntoResponse for RoleError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
