//! Sea-ORM entities for roles and their permissions

pub mod permission;
pub mod role;
