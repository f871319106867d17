//! Custom extractors for Axum handlers.
//!
//! Rejections are reported with the shared [`crate::ErrorResponse`] envelope.

pub mod uuid_path;
pub mod validated_json;
pub mod validated_query;

pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
