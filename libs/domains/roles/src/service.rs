use core_crud::{CrudRepository, CrudService};
use tracing::instrument;
use uuid::Uuid;

use crate::entity::role;
use crate::error::{RoleError, RoleResult};

/// Role management on top of the generic CRUD operations
pub struct RolesService<R> {
    repository: R,
}

impl<R> RolesService<R>
where
    R: CrudRepository<role::Model, role::ActiveModel>,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Role-scoped existence check
    #[instrument(skip(self))]
    pub async fn is_role_exists(&self, id: Uuid) -> RoleResult<bool> {
        self.is_entity_exists(id).await
    }

    /// Fetch a role or fail with [`RoleError::NotFound`]
    pub async fn get_role(&self, id: Uuid) -> RoleResult<role::Model> {
        self.find_one(id).await?.ok_or(RoleError::NotFound(id))
    }
}

impl<R> CrudService<role::Entity> for RolesService<R>
where
    R: CrudRepository<role::Model, role::ActiveModel>,
{
    type Repository = R;
    type Error = RoleError;

    fn repository(&self) -> &R {
        &self.repository
    }
}
