//! Authentication module.
//!
//! - HS256 token creation and verification ([`JwtAuth`])
//! - Bearer-token middleware for protected routes
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let protected = Router::new()
//!     .route("/api/protected", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware::<MyClaims>));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::{DEFAULT_EXPIRES_IN_SECS, JwtConfig};
pub use jwt::{JwtAuth, JwtEnvelope};
pub use middleware::jwt_auth_middleware;
