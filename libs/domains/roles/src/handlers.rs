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
use core_crud::{CrudRepository, CrudService, FindParams};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity::role;
use crate::error::RoleResult;
use crate::models::{CreateRoleDto, FindRolesDto, RoleResponse, RolesPage, UpdateRoleDto};
use crate::service::RolesService;

pub const TAG: &str = "roles";

/// OpenAPI documentation for Roles API
#[derive(OpenApi)]
#[openapi(
    paths(list_roles, create_role, get_role, update_role, delete_role),
    components(
        schemas(RoleResponse, RolesPage, CreateRoleDto, UpdateRoleDto, FindParams),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Role management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the role router with all HTTP endpoints
pub fn router<R>(service: RolesService<R>) -> Router
where
    R: CrudRepository<role::Model, role::ActiveModel> + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_roles).post(create_role))
        .route("/{id}", get(get_role).put(update_role).delete(delete_role))
        .with_state(shared_service)
}

/// List roles with filters, sorting and pagination
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(FindParams),
    responses(
        (status = 200, description = "Page of roles", body = RolesPage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_roles<R>(
    State(service): State<Arc<RolesService<R>>>,
    ValidatedQuery(dto): ValidatedQuery<FindRolesDto>,
) -> RoleResult<Json<RolesPage>>
where
    R: CrudRepository<role::Model, role::ActiveModel>,
{
    let page = service.find(&dto).await?.map(RoleResponse::from);
    Ok(Json(RolesPage {
        data: page.data,
        total: page.total,
    }))
}

/// Create a new role
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateRoleDto,
    responses(
        (status = 201, description = "Role created successfully", body = RoleResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_role<R>(
    State(service): State<Arc<RolesService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateRoleDto>,
) -> RoleResult<impl IntoResponse>
where
    R: CrudRepository<role::Model, role::ActiveModel>,
{
    let role = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(RoleResponse::from(role))))
}

/// Get a role by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Role ID")
    ),
    responses(
        (status = 200, description = "Role found", body = RoleResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_role<R>(
    State(service): State<Arc<RolesService<R>>>,
    UuidPath(id): UuidPath,
) -> RoleResult<Json<RoleResponse>>
where
    R: CrudRepository<role::Model, role::ActiveModel>,
{
    let role = service.get_role(id).await?;
    Ok(Json(role.into()))
}

/// Replace a role's name and description
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Role ID")
    ),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Role updated successfully", body = RoleResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_role<R>(
    State(service): State<Arc<RolesService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateRoleDto>,
) -> RoleResult<Json<RoleResponse>>
where
    R: CrudRepository<role::Model, role::ActiveModel>,
{
    let role = service.update(id, input).await?;
    Ok(Json(role.into()))
}

/// Delete a role
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Role ID")
    ),
    responses(
        (status = 204, description = "Role deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_role<R>(
    State(service): State<Arc<RolesService<R>>>,
    UuidPath(id): UuidPath,
) -> RoleResult<StatusCode>
where
    R: CrudRepository<role::Model, role::ActiveModel>,
{
    service.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use core_crud::MockCrudRepository;
    use tower::ServiceExt;
    use uuid::Uuid;

    type MockRoleRepository = MockCrudRepository<role::Model, role::ActiveModel>;

    fn admin() -> role::Model {
        let now = chrono::Utc::now().fixed_offset();
        role::Model {
            id: Uuid::now_v7(),
            name: "admin".to_string(),
            description: "Full access".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_get_unknown_role_is_404() {
        let mut repository = MockRoleRepository::new();
        repository.expect_find_by_id().returning(|_| Ok(None));

        let response = router(RolesService::new(repository))
            .oneshot(
                Request::builder()
                    .uri(format!("/{}", Uuid::now_v7()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_role_returns_201() {
        let mut repository = MockRoleRepository::new();
        repository.expect_save().times(1).returning(|_| Ok(admin()));

        let response = router(RolesService::new(repository))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":"admin","description":"Full access"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_create_role_rejects_empty_name() {
        let repository = MockRoleRepository::new();

        let response = router(RolesService::new(repository))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":""}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_rejects_unsafe_sort_column() {
        let repository = MockRoleRepository::new();

        let response = router(RolesService::new(repository))
            .oneshot(
                Request::builder()
                    .uri("/?sort_by=name%3Bdrop")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_role_returns_204() {
        let mut repository = MockRoleRepository::new();
        repository.expect_delete().times(1).returning(|_| Ok(1));

        let response = router(RolesService::new(repository))
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/{}", Uuid::now_v7()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
