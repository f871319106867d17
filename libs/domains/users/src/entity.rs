use core_crud::{CrudConfig, CrudEntity, FindParams};
use domain_roles::role;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::{CreateUserDto, UpdateUserDto};

/// Sea-ORM Entity for the users table.
///
/// `password` always holds a hash; it never leaves the service layer
/// except through [`crate::models::UserResponse`], which drops it.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub password: String,
    pub role_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "domain_roles::role::Entity",
        from = "Column::RoleId",
        to = "domain_roles::role::Column::Id"
    )]
    Role,
}

impl Related<role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl CrudEntity for Entity {
    type CreateDto = CreateUserDto;
    type UpdateDto = UpdateUserDto;
    type FindDto = FindParams;

    const CONFIG: CrudConfig = CrudConfig {
        name: "user",
        table: "users",
        search_by: "username",
        // password stays out
        sortable: &["id", "username", "role_id", "created_at", "updated_at"],
    };

    /// Expects `dto.password` to be hashed already.
    fn new_active_model(dto: CreateUserDto) -> ActiveModel {
        let now: DateTimeWithTimeZone = chrono::Utc::now().into();
        ActiveModel {
            id: Set(Uuid::now_v7()),
            username: Set(dto.username),
            password: Set(dto.password),
            role_id: Set(dto.role_id),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    fn updated_active_model(id: Uuid, dto: UpdateUserDto) -> ActiveModel {
        ActiveModel {
            id: Set(id),
            username: Set(dto.username),
            password: Set(dto.password),
            role_id: Set(dto.role_id),
            created_at: NotSet,
            updated_at: Set(chrono::Utc::now().into()),
        }
    }
}
