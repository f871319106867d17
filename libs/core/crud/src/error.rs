use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CrudError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Invalid query: {0}")]
    Query(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },
}

pub type CrudResult<T> = Result<T, CrudError>;

impl CrudError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CrudError::NotFound { .. })
    }
}
