use axum::{
    Extension, Json, Router,
    extract::State,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use axum_helpers::{
    JwtAuth, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
    jwt_auth_middleware,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::auth::AuthService;
use crate::error::{UserError, UserResult};
use crate::models::{AccessToken, LoginRequest, LoginResponse, TokenClaims, UserResponse};
use crate::password::PasswordHasher;
use crate::repository::UserRepository;
use crate::token::TokenSigner;

pub const TAG: &str = "auth";

/// OpenAPI documentation for Auth API
#[derive(OpenApi)]
#[openapi(
    paths(login, profile),
    components(
        schemas(LoginRequest, LoginResponse, AccessToken, UserResponse),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Authentication endpoints")
    )
)]
pub struct ApiDoc;

type SharedAuth<R, H, S> = Arc<AuthService<R, H, S>>;

/// Create the auth router. `/profile` requires a bearer token verified by `jwt`.
pub fn router<R, H, S>(service: AuthService<R, H, S>, jwt: JwtAuth) -> Router
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
    S: TokenSigner + 'static,
{
    let shared_service = Arc::new(service);

    let protected = Router::new()
        .route("/profile", get(profile))
        .route_layer(from_fn_with_state(jwt, jwt_auth_middleware::<TokenClaims>));

    Router::new()
        .route("/login", post(login))
        .merge(protected)
        .with_state(shared_service)
}

/// Exchange credentials for an access token
#[utoipa::path(
    post,
    path = "/login",
    tag = TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Access token issued", body = LoginResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R, H, S>(
    State(auth): State<SharedAuth<R, H, S>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Json<LoginResponse>>
where
    R: UserRepository,
    H: PasswordHasher,
    S: TokenSigner,
{
    let user = auth
        .validate_user(&input.username, &input.password)
        .await?
        .ok_or(UserError::InvalidCredentials)?;

    Ok(Json(auth.login(&user)?))
}

/// The user the bearer token was issued for
#[utoipa::path(
    get,
    path = "/profile",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Authenticated user", body = UserResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn profile<R, H, S>(
    State(auth): State<SharedAuth<R, H, S>>,
    Extension(claims): Extension<TokenClaims>,
) -> UserResult<Json<UserResponse>>
where
    R: UserRepository,
    H: PasswordHasher,
    S: TokenSigner,
{
    let user = auth.users().get_user(claims.id).await?;
    Ok(Json(user.into()))
}
