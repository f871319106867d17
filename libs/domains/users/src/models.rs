use chrono::{DateTime, Utc};
use core_crud::FindParams;
use domain_roles::{PermissionResponse, permission};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entity;

/// Starts with a letter, ends with a letter or digit, at least five characters
static USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][-._a-zA-Z\d]{3,}[a-zA-Z\d]$").unwrap());

static PASSWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\d@$!%*#?&]{5,}$").unwrap());

/// DTO for creating a user
#[derive(Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(regex(path = *USERNAME))]
    #[schema(example = "jane.doe")]
    pub username: String,
    #[validate(regex(path = *PASSWORD))]
    #[schema(example = "s3cret!")]
    pub password: String,
    pub role_id: Uuid,
}

/// DTO for updating a user. Every field is overwritten and the password re-hashed.
#[derive(Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(regex(path = *USERNAME))]
    pub username: String,
    #[validate(regex(path = *PASSWORD))]
    pub password: String,
    pub role_id: Uuid,
}

impl fmt::Debug for CreateUserDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserDto")
            .field("username", &self.username)
            .field("password", &"***")
            .field("role_id", &self.role_id)
            .finish()
    }
}

impl fmt::Debug for UpdateUserDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateUserDto")
            .field("username", &self.username)
            .field("password", &"***")
            .field("role_id", &self.role_id)
            .finish()
    }
}

/// Query parameters accepted by the user listing
pub type FindUsersDto = FindParams;

/// Credentials posted to the login endpoint
#[derive(Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 255))]
    pub username: String,
    #[validate(length(min = 1, max = 255))]
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Public projection of a user: everything except the password hash
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub role_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::Model> for UserResponse {
    fn from(model: entity::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            role_id: model.role_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Paginated user listing
#[derive(Debug, Serialize, ToSchema)]
pub struct UsersPage {
    pub data: Vec<UserResponse>,
    pub total: u64,
}

/// A user together with the allowed permissions of their role
#[derive(Debug, Clone, PartialEq)]
pub struct UserWithPermissions {
    pub user: entity::Model,
    pub permissions: Vec<permission::Model>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserPermissionsResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub permissions: Vec<PermissionResponse>,
}

impl From<UserWithPermissions> for UserPermissionsResponse {
    fn from(value: UserWithPermissions) -> Self {
        Self {
            user: value.user.into(),
            permissions: value.permissions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Payload signed into access tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccessToken {
    pub access_token: String,
}

/// `{ "data": { "access_token": "..." } }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub data: AccessToken,
}
