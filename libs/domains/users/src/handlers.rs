use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    UuidPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
};
use core_crud::{CrudService, FindParams};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{UserError, UserResult};
use crate::models::{
    CreateUserDto, FindUsersDto, UpdateUserDto, UserPermissionsResponse, UserResponse, UsersPage,
};
use crate::password::PasswordHasher;
use crate::repository::UserRepository;
use crate::service::UsersService;

pub const TAG: &str = "users";

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, update_user, delete_user, get_user_permissions),
    components(
        schemas(
            UserResponse,
            UsersPage,
            UserPermissionsResponse,
            CreateUserDto,
            UpdateUserDto,
            FindParams
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "User management endpoints")
    )
)]
pub struct ApiDoc;

type SharedService<R, H> = Arc<UsersService<R, H>>;

/// Create the users router with all HTTP endpoints
pub fn router<R, H>(service: UsersService<R, H>) -> Router
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/{id}/permissions", get(get_user_permissions))
        .with_state(shared_service)
}

/// List users with filters, sorting and pagination
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(FindParams),
    responses(
        (status = 200, description = "Page of users", body = UsersPage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository, H: PasswordHasher>(
    State(service): State<SharedService<R, H>>,
    ValidatedQuery(dto): ValidatedQuery<FindUsersDto>,
) -> UserResult<Json<UsersPage>> {
    let page = service.find(&dto).await?.map(UserResponse::from);
    Ok(Json(UsersPage {
        data: page.data,
        total: page.total,
    }))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository, H: PasswordHasher>(
    State(service): State<SharedService<R, H>>,
    ValidatedJson(input): ValidatedJson<CreateUserDto>,
) -> UserResult<impl IntoResponse> {
    let user = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository, H: PasswordHasher>(
    State(service): State<SharedService<R, H>>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<UserResponse>> {
    let user = service.get_user(id).await?;
    Ok(Json(user.into()))
}

/// Replace a user's username, password and role
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository, H: PasswordHasher>(
    State(service): State<SharedService<R, H>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateUserDto>,
) -> UserResult<Json<UserResponse>> {
    let user = service.update(id, input).await?;
    Ok(Json(user.into()))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository, H: PasswordHasher>(
    State(service): State<SharedService<R, H>>,
    UuidPath(id): UuidPath,
) -> UserResult<StatusCode> {
    service.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get a user with the allowed permissions of their role
#[utoipa::path(
    get,
    path = "/{id}/permissions",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User with allowed permissions", body = UserPermissionsResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user_permissions<R: UserRepository, H: PasswordHasher>(
    State(service): State<SharedService<R, H>>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<UserPermissionsResponse>> {
    let user = service
        .get_user_with_permissions(id)
        .await?
        .ok_or(UserError::NotFound(id))?;
    Ok(Json(user.into()))
}
