use chrono::{DateTime, Utc};
use core_crud::FindParams;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entity::{permission, role};

/// DTO for creating a role
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRoleDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub description: String,
}

/// DTO for updating a role. Every field is overwritten.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateRoleDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub description: String,
}

/// Query parameters accepted by the role listing
pub type FindRolesDto = FindParams;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RoleResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<role::Model> for RoleResponse {
    fn from(model: role::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Paginated role listing
#[derive(Debug, Serialize, ToSchema)]
pub struct RolesPage {
    pub data: Vec<RoleResponse>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PermissionResponse {
    pub id: Uuid,
    pub role_id: Uuid,
    pub name: String,
    pub is_allowed: bool,
}

impl From<permission::Model> for PermissionResponse {
    fn from(model: permission::Model) -> Self {
        Self {
            id: model.id,
            role_id: model.role_id,
            name: model.name,
            is_allowed: model.is_allowed,
        }
    }
}
