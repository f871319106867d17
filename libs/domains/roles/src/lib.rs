//! Roles Domain
//!
//! Roles group users and carry the permissions those users are granted.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │RolesService │  ← core_crud::CrudService defaults + is_role_exists
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← core_crud::SeaOrmRepository<role::Entity>
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Entities   │  ← roles, permissions
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use core_crud::SeaOrmRepository;
//! use domain_roles::{RolesService, handlers};
//! # fn wire(db: sea_orm::DatabaseConnection) {
//! let service = RolesService::new(SeaOrmRepository::<domain_roles::role::Entity>::new(db));
//! let router = handlers::router(service);
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod service;

pub use entity::{permission, role};
pub use error::{RoleError, RoleResult};
pub use models::{CreateRoleDto, FindRolesDto, PermissionResponse, RoleResponse, UpdateRoleDto};
pub use service::RolesService;

/// Role repository backed by PostgreSQL
pub type PgRoleRepository = core_crud::SeaOrmRepository<role::Entity>;
