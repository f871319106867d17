//! Generic CRUD
//!
//! Shared filtering, pagination, sorting and existence checks for every
//! entity exposed by the admin backend. An entity opts in by implementing
//! [`CrudEntity`]; a service then implements [`CrudService`] and inherits
//! `find`, `find_one`, `create`, `update`, `remove` and `is_entity_exists`,
//! overriding only what its domain rules require.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │ CrudService  │  ← Default operations, overridable per entity
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │ SelectQuery  │  ← Query plan: predicates, join, offset, limit, order
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │  Repository  │  ← CrudRepository trait + SeaOrmRepository
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │   Renderer   │  ← SelectQuery → sea_orm::Select
//! └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use core_crud::{CrudService, FindParams, SeaOrmRepository};
//!
//! let repository = SeaOrmRepository::<role::Entity>::new(db);
//! let service = RolesService::new(repository);
//!
//! let page = service.find(&FindParams::default()).await?;
//! println!("{} roles", page.total);
//! ```

pub mod entity;
pub mod error;
pub mod params;
pub mod query;
pub mod render;
pub mod repository;
pub mod service;

pub use entity::{CrudConfig, CrudEntity};
pub use error::{CrudError, CrudResult};
pub use params::{FindParams, Page, SortDirection, DEFAULT_LIMIT, DEFAULT_SORT_BY};
pub use query::{DateBound, Field, JoinMany, OrderBy, Predicate, SelectQuery};
pub use repository::{CrudRepository, SeaOrmRepository};
pub use service::CrudService;

#[cfg(any(test, feature = "mock"))]
pub use repository::MockCrudRepository;
