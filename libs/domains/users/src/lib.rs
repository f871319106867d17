//! Users Domain
//!
//! User management and authentication for the admin backend.
//!
//! # Features
//!
//! - User CRUD through the generic `core_crud` operations
//! - Unique usernames, Argon2 password hashing
//! - Effective permissions through the user's role
//! - Login issuing HS256 access tokens
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────┐
//! │  Handlers / Auth handlers   │  ← HTTP endpoints
//! └──────┬───────────────┬──────┘
//!        │               │
//! ┌──────▼──────┐ ┌──────▼──────┐
//! │UsersService │◄┤ AuthService │  ← PasswordHasher, TokenSigner
//! └──────┬──────┘ └─────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← CrudRepository + permission join
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Entity    │  ← users (belongs to roles)
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_users::{Argon2Hasher, AuthService, PgUserRepository, UsersService};
//! # fn wire(db: sea_orm::DatabaseConnection) {
//! let jwt = JwtAuth::new(&JwtConfig::new("change-me-change-me-change-me-change-me"));
//! let users = UsersService::new(PgUserRepository::new(db), Argon2Hasher);
//! let auth = AuthService::new(users.clone(), jwt.clone());
//!
//! let users_router = domain_users::handlers::router(users);
//! let auth_router = domain_users::auth_handlers::router(auth, jwt);
//! # }
//! ```

pub mod auth;
pub mod auth_handlers;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use auth::AuthService;
pub use error::{UserError, UserResult};
pub use models::{
    CreateUserDto, FindUsersDto, LoginRequest, LoginResponse, TokenClaims, UpdateUserDto,
    UserPermissionsResponse, UserResponse, UserWithPermissions,
};
pub use password::{Argon2Hasher, PasswordHasher};
pub use repository::{PgUserRepository, UserRepository};
pub use service::UsersService;
pub use token::TokenSigner;
