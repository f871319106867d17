use core_crud::{CrudConfig, CrudEntity, FindParams};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::{CreateRoleDto, UpdateRoleDto};

/// Sea-ORM Entity for the roles table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::permission::Entity")]
    Permission,
}

impl Related<super::permission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Permission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl CrudEntity for Entity {
    type CreateDto = CreateRoleDto;
    type UpdateDto = UpdateRoleDto;
    type FindDto = FindParams;

    const CONFIG: CrudConfig = CrudConfig {
        name: "role",
        table: "roles",
        search_by: "name",
        sortable: &["id", "name", "description", "created_at", "updated_at"],
    };

    fn new_active_model(dto: CreateRoleDto) -> ActiveModel {
        let now: DateTimeWithTimeZone = chrono::Utc::now().into();
        ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(dto.name),
            description: Set(dto.description),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    fn updated_active_model(id: Uuid, dto: UpdateRoleDto) -> ActiveModel {
        ActiveModel {
            id: Set(id),
            name: Set(dto.name),
            description: Set(dto.description),
            created_at: NotSet,
            updated_at: Set(chrono::Utc::now().into()),
        }
    }
}
