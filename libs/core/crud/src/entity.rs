use sea_orm::EntityTrait;
use uuid::Uuid;

use crate::params::FindParams;

/// Per-entity configuration of the generic CRUD operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrudConfig {
    /// Root alias of query plans and log field value, e.g. `user`
    pub name: &'static str,
    /// Backing table, e.g. `users`
    pub table: &'static str,
    /// Column matched by the `search` filter
    pub search_by: &'static str,
    /// Columns accepted by `sort_by`; anything else is a query error
    pub sortable: &'static [&'static str],
}

/// Binds a sea-orm entity to its CRUD configuration and its three DTO shapes.
///
/// `new_active_model` is the "build an unsaved entity from a create DTO" step;
/// `updated_active_model` overwrites every mutable column and refreshes
/// `updated_at`, leaving `created_at` untouched.
pub trait CrudEntity: EntityTrait<Model: Sync, ActiveModel: Send + Sync> {
    type CreateDto: Send + Sync + 'static;
    type UpdateDto: Send + Sync + 'static;
    type FindDto: AsRef<FindParams> + Send + Sync + 'static;

    const CONFIG: CrudConfig;

    fn new_active_model(dto: Self::CreateDto) -> Self::ActiveModel;

    fn updated_active_model(id: Uuid, dto: Self::UpdateDto) -> Self::ActiveModel;
}
