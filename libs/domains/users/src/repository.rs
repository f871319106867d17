use async_trait::async_trait;
use core_crud::render::to_select;
use core_crud::{CrudError, CrudRepository, CrudResult, SeaOrmRepository, SelectQuery};
use domain_roles::permission;
use sea_orm::entity::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{FromQueryResult, QuerySelect, Select};
use uuid::Uuid;

use crate::entity;
use crate::models::UserWithPermissions;

/// Persistence for users: the generic CRUD collaborator plus the
/// permission join.
#[async_trait]
pub trait UserRepository: CrudRepository<entity::Model, entity::ActiveModel> {
    /// Runs `query` (rooted at the user table, with one permission join)
    /// and folds the joined rows into a single user.
    async fn find_with_permissions(
        &self,
        query: SelectQuery,
    ) -> CrudResult<Option<UserWithPermissions>>;
}

pub type PgUserRepository = SeaOrmRepository<entity::Entity>;

/// Flat row of `users LEFT JOIN permissions`
#[derive(Debug, FromQueryResult)]
struct UserPermissionRow {
    id: Uuid,
    username: String,
    password: String,
    role_id: Uuid,
    created_at: DateTimeWithTimeZone,
    updated_at: DateTimeWithTimeZone,
    permission_id: Option<Uuid>,
    permission_role_id: Option<Uuid>,
    permission_name: Option<String>,
    permission_is_allowed: Option<bool>,
    permission_created_at: Option<DateTimeWithTimeZone>,
    permission_updated_at: Option<DateTimeWithTimeZone>,
}

impl UserPermissionRow {
    fn user(&self) -> entity::Model {
        entity::Model {
            id: self.id,
            username: self.username.clone(),
            password: self.password.clone(),
            role_id: self.role_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn permission(self) -> Option<permission::Model> {
        Some(permission::Model {
            id: self.permission_id?,
            role_id: self.permission_role_id?,
            name: self.permission_name?,
            is_allowed: self.permission_is_allowed?,
            created_at: self.permission_created_at?,
            updated_at: self.permission_updated_at?,
        })
    }
}

const PERMISSION_COLUMNS: [&str; 6] = [
    "id",
    "role_id",
    "name",
    "is_allowed",
    "created_at",
    "updated_at",
];

/// Adds every joined permission column as `permission_<column>`
fn with_permission_columns(
    select: Select<entity::Entity>,
    join_alias: &str,
) -> Select<entity::Entity> {
    PERMISSION_COLUMNS.iter().fold(select, |select, column| {
        select.column_as(
            Expr::col((join_alias.to_string(), column.to_string())),
            format!("permission_{column}"),
        )
    })
}

fn fold_rows(rows: Vec<UserPermissionRow>) -> Option<UserWithPermissions> {
    let user = rows.first()?.user();
    let permissions = rows
        .into_iter()
        .filter(|row| row.id == user.id)
        .filter_map(UserPermissionRow::permission)
        .collect();

    Some(UserWithPermissions { user, permissions })
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_with_permissions(
        &self,
        query: SelectQuery,
    ) -> CrudResult<Option<UserWithPermissions>> {
        let join_alias = query
            .joins
            .first()
            .map(|join| join.alias.as_str())
            .ok_or_else(|| CrudError::Query("user query has no permission join".to_string()))?;

        let rows = with_permission_columns(to_select::<entity::Entity>(&query)?, join_alias)
            .into_model::<UserPermissionRow>()
            .all(self.db())
            .await?;

        tracing::debug!(rows = rows.len(), "Loaded user permission rows");
        Ok(fold_rows(rows))
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;

    mockall::mock! {
        pub UserRepo {}

        #[async_trait]
        impl CrudRepository<entity::Model, entity::ActiveModel> for UserRepo {
            async fn find_by_id(&self, id: Uuid) -> CrudResult<Option<entity::Model>>;
            async fn find_one(&self, query: SelectQuery) -> CrudResult<Option<entity::Model>>;
            async fn find_and_count(&self, query: SelectQuery) -> CrudResult<(Vec<entity::Model>, u64)>;
            async fn save(&self, model: entity::ActiveModel) -> CrudResult<entity::Model>;
            async fn update(&self, id: Uuid, model: entity::ActiveModel) -> CrudResult<entity::Model>;
            async fn delete(&self, id: Uuid) -> CrudResult<u64>;
        }

        #[async_trait]
        impl UserRepository for UserRepo {
            async fn find_with_permissions(
                &self,
                query: SelectQuery,
            ) -> CrudResult<Option<UserWithPermissions>>;
        }
    }
}
