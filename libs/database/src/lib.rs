//! Database library providing the PostgreSQL connector used by the admin backend
//!
//! # Example
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config(PostgresConfig::from_env()?).await?;
//! postgres::run_migrations::<Migrator>(&db, "admin_api").await?;
//! ```

pub mod error;
pub mod postgres;

pub use error::{DatabaseError, DatabaseResult};
