use axum::{Router, middleware::from_fn_with_state};
use axum_helpers::jwt_auth_middleware;
use domain_roles::{PgRoleRepository, RolesService};
use domain_users::{Argon2Hasher, AuthService, PgUserRepository, TokenClaims, UsersService};

pub mod health;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// `/users` and `/roles` require a bearer token; `/auth/login` does not.
pub fn routes(state: &crate::state::AppState) -> Router {
    let users = UsersService::new(PgUserRepository::new(state.db.clone()), Argon2Hasher);
    let roles = RolesService::new(PgRoleRepository::new(state.db.clone()));
    let auth = AuthService::new(users.clone(), state.jwt.clone());

    let bearer = from_fn_with_state(state.jwt.clone(), jwt_auth_middleware::<TokenClaims>);

    Router::new()
        .nest(
            "/auth",
            domain_users::auth_handlers::router(auth, state.jwt.clone()),
        )
        .nest(
            "/users",
            domain_users::handlers::router(users).route_layer(bearer.clone()),
        )
        .nest(
            "/roles",
            domain_roles::handlers::router(roles).route_layer(bearer),
        )
}

/// Router with the `/health` endpoint, merged next to the `/api` routes.
pub fn health_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/health", get(health::health_handler))
        .with_state(state.db)
}
