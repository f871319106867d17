//! # Axum Helpers
//!
//! Utilities shared by the HTTP surface of the admin backend.
//!
//! ## Modules
//!
//! - **[`auth`]**: HS256 JWT issuance/verification and bearer middleware
//! - **[`server`]**: Router assembly with Swagger UI, graceful shutdown
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: Validated JSON/query and UUID path extractors
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router};
//! use std::time::Duration;
//!
//! let router = create_router::<ApiDoc>(api_routes).await?;
//! create_production_app(router, &config.server, Duration::from_secs(30), async {}).await?;
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod server;

// Re-export auth types
pub use auth::{JwtAuth, JwtConfig, JwtEnvelope, jwt_auth_middleware};

// Re-export server types
pub use server::{
    ShutdownCoordinator, create_production_app, create_router, shutdown_signal,
};

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};

// Re-export extractors
pub use extractors::{UuidPath, ValidatedJson, ValidatedQuery};
